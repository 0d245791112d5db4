//! Per-link analytics.

use std::sync::Arc;
use std::time::Duration;

use super::store_call::bounded;
use crate::domain::entities::ShortLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for reading link analytics.
///
/// Analytics is a read of the stored record: the total is derived from the
/// click history, so it always equals the number of entries returned. Expired
/// links remain readable.
pub struct StatsService {
    repository: Arc<dyn LinkRepository>,
    store_timeout: Duration,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<dyn LinkRepository>, store_timeout: Duration) -> Self {
        Self {
            repository,
            store_timeout,
        }
    }

    /// Retrieves a link together with its full click history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::StoreUnavailable`] on storage failure or timeout.
    pub async fn get_analytics(&self, code: &str) -> Result<ShortLink, AppError> {
        bounded(
            self.store_timeout,
            "find_by_code",
            self.repository.find_by_code(code),
        )
        .await?
        .ok_or_else(|| AppError::not_found("Shortcode not found", json!({ "shortcode": code })))
    }

    /// Counts the total number of links in the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on storage failure or timeout.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        bounded(self.store_timeout, "count", self.repository.count()).await
    }

    /// Round-trips to the store for health reporting.
    pub async fn check_store(&self) -> Result<(), AppError> {
        bounded(self.store_timeout, "ping", self.repository.ping()).await
    }
}
