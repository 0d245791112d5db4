//! Short link creation and code reservation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::store_call::bounded;
use crate::config::ServiceSettings;
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::audit::AuditLog;
use crate::utils::code_generator::{generate_code, is_reserved_code, validate_code};
use crate::utils::url_validator::validate_target_url;

/// Service for issuing short codes and creating links.
///
/// Combines the code generator, the uniqueness pre-check, and the store insert.
/// The pre-check only saves a round trip on the common path; the store's
/// insert-if-absent is what guarantees one record per code.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    audit: AuditLog,
    base_url: String,
    default_validity_minutes: u32,
    max_code_attempts: usize,
    store_timeout: Duration,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        audit: AuditLog,
        settings: &ServiceSettings,
    ) -> Self {
        Self {
            repository,
            audit,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            default_validity_minutes: settings.default_validity_minutes,
            max_code_attempts: settings.max_code_attempts,
            store_timeout: settings.store_timeout,
        }
    }

    /// Creates a short link valid from `now` for `validity_minutes`
    /// (the configured default when `None`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - URL is not an absolute http(s) URL
    /// - Validity is zero
    /// - Custom code does not match the format rule
    ///
    /// Returns [`AppError::Conflict`] if the custom code is taken, including
    /// when a concurrent request claimed it between pre-check and insert.
    ///
    /// Returns [`AppError::ExhaustedNamespace`] if no free code was found.
    pub async fn create_short_link(
        &self,
        url: &str,
        validity_minutes: Option<u32>,
        custom_code: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<ShortLink, AppError> {
        validate_target_url(url).map_err(|e| {
            AppError::bad_request("Invalid or missing URL", json!({ "reason": e.to_string() }))
        })?;

        let validity = match validity_minutes {
            Some(0) => {
                return Err(AppError::bad_request(
                    "Validity must be a positive integer (minutes)",
                    json!({ "validity": 0 }),
                ));
            }
            Some(minutes) => minutes,
            None => self.default_validity_minutes,
        };

        if let Some(code) = &custom_code {
            validate_code(code)?;
        }

        let code = self.reserve_code(custom_code).await?;
        let new_link = NewShortLink::with_validity(code, url.to_string(), now, validity);

        let link = bounded(
            self.store_timeout,
            "insert",
            self.repository.insert(new_link),
        )
        .await
        .inspect_err(|e| {
            if matches!(e, AppError::Conflict { .. }) {
                warn!("Lost insert race for a reserved short code");
            }
        })?;

        metrics::counter!("shorturls_links_created_total").increment(1);
        info!(code = %link.code, expiry = %link.expiry, "Short link created");
        self.audit.record(format!(
            "Short URL created: {} -> {}, expires at {}",
            link.code,
            link.original_url,
            link.expiry.to_rfc3339_opts(SecondsFormat::Millis, true)
        ));

        Ok(link)
    }

    /// Claims a code for a new link.
    ///
    /// - With a candidate: validates its format and rejects it with
    ///   [`AppError::Conflict`] if a record already uses it.
    /// - Without: draws random codes until an unused one is found, giving up
    ///   with [`AppError::ExhaustedNamespace`] after the configured number of
    ///   attempts.
    pub async fn reserve_code(&self, candidate: Option<String>) -> Result<String, AppError> {
        if let Some(code) = candidate {
            validate_code(&code)?;

            if self.code_exists(&code).await? {
                return Err(AppError::conflict(
                    "Shortcode already in use",
                    json!({ "shortcode": code }),
                ));
            }

            return Ok(code);
        }

        for _ in 0..self.max_code_attempts {
            let code = generate_code();
            if is_reserved_code(&code) {
                continue;
            }

            if !self.code_exists(&code).await? {
                return Ok(code);
            }
        }

        Err(AppError::exhausted(
            "Failed to generate unique shortcode",
            json!({ "attempts": self.max_code_attempts }),
        ))
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        bounded(
            self.store_timeout,
            "exists_by_code",
            self.repository.exists_by_code(code),
        )
        .await
    }
}
