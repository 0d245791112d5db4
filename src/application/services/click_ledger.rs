//! Append-only click recording.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

use super::store_call::bounded;
use crate::domain::entities::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Appends visit entries to a link's click history.
///
/// The ledger never reads, rewrites or removes existing entries; each visit is
/// a single atomic append in the store. Expiry is not checked here.
pub struct ClickLedger {
    repository: Arc<dyn LinkRepository>,
    store_timeout: Duration,
}

impl ClickLedger {
    /// Creates a new click ledger.
    pub fn new(repository: Arc<dyn LinkRepository>, store_timeout: Duration) -> Self {
        Self {
            repository,
            store_timeout,
        }
    }

    /// Records one visit to `code` at `now`.
    ///
    /// A missing referrer is stored as `"direct"`, a missing location as `"unknown"`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::StoreUnavailable`] on storage failure or timeout.
    pub async fn record_visit(
        &self,
        code: &str,
        referrer: Option<&str>,
        location: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ClickEvent, AppError> {
        let click = ClickEvent::new(now, referrer, location);

        bounded(
            self.store_timeout,
            "append_click",
            self.repository.append_click(code, click.clone()),
        )
        .await?;

        metrics::counter!("shorturls_clicks_recorded_total").increment(1);
        Ok(click)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DIRECT_REFERRER, UNKNOWN_LOCATION};
    use crate::domain::repositories::{MockLinkRepository, StoreError};

    fn ledger(repo: MockLinkRepository) -> ClickLedger {
        ClickLedger::new(Arc::new(repo), Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_record_visit_appends_event() {
        let now = Utc::now();
        let mut repo = MockLinkRepository::new();
        repo.expect_append_click()
            .withf(move |code, click| {
                code == "abc123"
                    && click.timestamp == now
                    && click.referrer == "https://news.example"
                    && click.location == "FR"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let click = ledger(repo)
            .record_visit("abc123", Some("https://news.example"), Some("FR"), now)
            .await
            .unwrap();

        assert_eq!(click.location, "FR");
    }

    #[tokio::test]
    async fn test_record_visit_uses_markers() {
        let mut repo = MockLinkRepository::new();
        repo.expect_append_click()
            .withf(|_, click| {
                click.referrer == DIRECT_REFERRER && click.location == UNKNOWN_LOCATION
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let result = ledger(repo)
            .record_visit("abc123", None, None, Utc::now())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_record_visit_unknown_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_append_click()
            .returning(|code, _| Err(StoreError::NotFound(code.to_string())));

        let result = ledger(repo)
            .record_visit("missing", None, None, Utc::now())
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_record_visit_store_failure() {
        let mut repo = MockLinkRepository::new();
        repo.expect_append_click()
            .returning(|_, _| Err(StoreError::Unavailable("disk full".to_string())));

        let result = ledger(repo)
            .record_visit("abc123", None, None, Utc::now())
            .await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    }
}
