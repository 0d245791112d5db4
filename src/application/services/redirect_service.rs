//! Redirect resolution: lookup, expiry check, visit recording.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::click_ledger::ClickLedger;
use super::store_call::bounded;
use crate::domain::repositories::LinkRepository;
use crate::domain::visit::VisitContext;
use crate::error::AppError;
use crate::infrastructure::audit::AuditLog;
use crate::infrastructure::geo::GeoLocator;
use crate::utils::code_generator::is_valid_code;

/// What happens to a redirect whose click could not be recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisitRecordingPolicy {
    /// No redirect without a durably recorded click; the request fails.
    #[default]
    FailClosed,
    /// Redirect anyway and log the lost click.
    BestEffort,
}

impl FromStr for VisitRecordingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail_closed" => Ok(Self::FailClosed),
            "best_effort" => Ok(Self::BestEffort),
            other => Err(format!(
                "expected 'fail_closed' or 'best_effort', got '{other}'"
            )),
        }
    }
}

impl fmt::Display for VisitRecordingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailClosed => f.write_str("fail_closed"),
            Self::BestEffort => f.write_str("best_effort"),
        }
    }
}

/// Resolves a short code to its redirect target.
///
/// Per request: `LOOKUP → EXPIRY_CHECK → RECORD_VISIT → RESPOND`.
/// Unknown codes fail with [`AppError::NotFound`], expired ones with
/// [`AppError::Gone`] and no click is recorded for either.
pub struct RedirectService {
    repository: Arc<dyn LinkRepository>,
    ledger: ClickLedger,
    geo: Arc<dyn GeoLocator>,
    audit: AuditLog,
    policy: VisitRecordingPolicy,
    store_timeout: Duration,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        geo: Arc<dyn GeoLocator>,
        audit: AuditLog,
        policy: VisitRecordingPolicy,
        store_timeout: Duration,
    ) -> Self {
        Self {
            ledger: ClickLedger::new(repository.clone(), store_timeout),
            repository,
            geo,
            audit,
            policy,
            store_timeout,
        }
    }

    /// Returns the target URL for `code` and records the visit.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for unknown codes (including malformed ones)
    /// - [`AppError::Gone`] when `now` is after the link's expiry
    /// - [`AppError::StoreUnavailable`] when the lookup fails, or when the
    ///   click cannot be recorded under [`VisitRecordingPolicy::FailClosed`]
    pub async fn resolve(
        &self,
        code: &str,
        visit: VisitContext,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        let link = bounded(
            self.store_timeout,
            "find_by_code",
            self.repository.find_by_code(code),
        )
        .await?
        .ok_or_else(|| {
            metrics::counter!("shorturls_redirects_rejected_total", "reason" => "not_found")
                .increment(1);
            not_found(code)
        })?;

        if link.is_expired_at(now) {
            metrics::counter!("shorturls_redirects_rejected_total", "reason" => "expired")
                .increment(1);
            debug!(code, expiry = %link.expiry, "Rejecting expired short link");
            return Err(AppError::gone(
                "Short URL has expired",
                json!({ "shortcode": code, "expiry": link.expiry }),
            ));
        }

        let location = visit.client_ip.and_then(|ip| self.geo.locate(ip));

        match self
            .ledger
            .record_visit(code, visit.referrer.as_deref(), location.as_deref(), now)
            .await
        {
            Ok(click) => {
                self.audit.record(format!(
                    "Redirecting shortcode {} to {} (click from {}, referrer: {})",
                    code, link.original_url, click.location, click.referrer
                ));
            }
            Err(e) => match self.policy {
                VisitRecordingPolicy::FailClosed => return Err(e),
                VisitRecordingPolicy::BestEffort => {
                    warn!(code, error = %e, "Click not recorded, redirecting anyway");
                }
            },
        }

        Ok(link.original_url)
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Shortcode not found", json!({ "shortcode": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NewShortLink, ShortLink};
    use crate::domain::repositories::{MockLinkRepository, StoreError};
    use crate::infrastructure::geo::NullGeoLocator;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use std::net::IpAddr;

    struct FixedGeo(&'static str);

    impl GeoLocator for FixedGeo {
        fn locate(&self, _ip: IpAddr) -> Option<String> {
            Some(self.0.to_string())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn link(code: &str) -> ShortLink {
        NewShortLink::with_validity(
            code.to_string(),
            "https://example.com".to_string(),
            created(),
            1,
        )
        .into()
    }

    fn service(
        repo: MockLinkRepository,
        geo: Arc<dyn GeoLocator>,
        policy: VisitRecordingPolicy,
    ) -> RedirectService {
        RedirectService::new(
            Arc::new(repo),
            geo,
            AuditLog::disabled(),
            policy,
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn test_resolve_records_click_and_returns_target() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(link(code))));
        repo.expect_append_click()
            .withf(|code, click| {
                code == "abc123"
                    && click.referrer == "https://blog.example"
                    && click.location == "SE"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let visit = VisitContext::new(
            Some("https://blog.example"),
            Some("81.2.69.160".parse().unwrap()),
        );
        let target = service(repo, Arc::new(FixedGeo("SE")), VisitRecordingPolicy::FailClosed)
            .resolve("abc123", visit, created() + ChronoDuration::seconds(30))
            .await
            .unwrap();

        assert_eq!(target, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_at_exact_expiry_still_redirects() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(link(code))));
        repo.expect_append_click().times(1).returning(|_, _| Ok(()));

        let result = service(
            repo,
            Arc::new(NullGeoLocator::new()),
            VisitRecordingPolicy::FailClosed,
        )
        .resolve(
            "abc123",
            VisitContext::default(),
            created() + ChronoDuration::minutes(1),
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_expired_is_gone_without_click() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(link(code))));
        repo.expect_append_click().times(0);

        let result = service(
            repo,
            Arc::new(NullGeoLocator::new()),
            VisitRecordingPolicy::FailClosed,
        )
        .resolve(
            "abc123",
            VisitContext::default(),
            created() + ChronoDuration::minutes(1) + ChronoDuration::milliseconds(1),
        )
        .await;

        assert!(matches!(result, Err(AppError::Gone { .. })));
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_append_click().times(0);

        let result = service(
            repo,
            Arc::new(NullGeoLocator::new()),
            VisitRecordingPolicy::FailClosed,
        )
        .resolve("nope12", VisitContext::default(), created())
        .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_store() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().times(0);

        let result = service(
            repo,
            Arc::new(NullGeoLocator::new()),
            VisitRecordingPolicy::FailClosed,
        )
        .resolve("favicon.ico", VisitContext::default(), created())
        .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_fail_closed_policy_blocks_redirect() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(link(code))));
        repo.expect_append_click()
            .returning(|_, _| Err(StoreError::Unavailable("write failed".to_string())));

        let result = service(
            repo,
            Arc::new(NullGeoLocator::new()),
            VisitRecordingPolicy::FailClosed,
        )
        .resolve("abc123", VisitContext::default(), created())
        .await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_best_effort_policy_redirects_anyway() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(link(code))));
        repo.expect_append_click()
            .returning(|_, _| Err(StoreError::Unavailable("write failed".to_string())));

        let result = service(
            repo,
            Arc::new(NullGeoLocator::new()),
            VisitRecordingPolicy::BestEffort,
        )
        .resolve("abc123", VisitContext::default(), created())
        .await;

        assert_eq!(result.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_lookup_failure_is_store_unavailable() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .returning(|_| Err(StoreError::Unavailable("pool timed out".to_string())));

        let result = service(
            repo,
            Arc::new(NullGeoLocator::new()),
            VisitRecordingPolicy::BestEffort,
        )
        .resolve("abc123", VisitContext::default(), created())
        .await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "fail_closed".parse::<VisitRecordingPolicy>().unwrap(),
            VisitRecordingPolicy::FailClosed
        );
        assert_eq!(
            "BEST_EFFORT".parse::<VisitRecordingPolicy>().unwrap(),
            VisitRecordingPolicy::BestEffort
        );
        assert!("sometimes".parse::<VisitRecordingPolicy>().is_err());
    }
}
