//! Time-bounded store access.

use std::future::Future;
use std::time::Duration;

use crate::domain::repositories::StoreError;
use crate::error::AppError;

/// Awaits a repository call for at most `limit`.
///
/// Store errors are translated through `From<StoreError> for AppError`; an
/// elapsed deadline becomes [`AppError::StoreUnavailable`].
///
/// A deadline only stops waiting. A statement already sent to PostgreSQL may
/// still commit after the future is dropped, so a timed-out `append_click`
/// can leave a click recorded for a request that was answered with 500.
pub(crate) async fn bounded<T, F>(
    limit: Duration,
    operation: &'static str,
    call: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => Err(AppError::store_unavailable(format!(
            "{operation} timed out after {}ms",
            limit.as_millis()
        ))),
    }
}
