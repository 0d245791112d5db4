//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::config::RateLimitSettings;

/// Creates a per-IP rate limiter keyed on the socket peer address.
///
/// # Limits
///
/// - **Rate**: `settings.per_second` requests per second
/// - **Burst**: `settings.burst` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/shorturls", post(shorten_handler))
///     .layer(rate_limit::layer(&settings));
/// ```
pub fn layer(
    settings: &RateLimitSettings,
) -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(build(
        GovernorConfigBuilder::default().key_extractor(PeerIpKeyExtractor),
        settings,
    ));

    GovernorLayer::new(governor_conf)
}

/// Same limits as [`layer`], keyed on `X-Forwarded-For` / `X-Real-IP` /
/// `Forwarded` before falling back to the peer address.
///
/// Use only behind a trusted reverse proxy.
pub fn proxy_layer(
    settings: &RateLimitSettings,
) -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(build(
        GovernorConfigBuilder::default().key_extractor(SmartIpKeyExtractor),
        settings,
    ));

    GovernorLayer::new(governor_conf)
}

fn build<K>(
    mut builder: GovernorConfigBuilder<K, NoOpMiddleware<QuantaInstant>>,
    settings: &RateLimitSettings,
) -> GovernorConfig<K, NoOpMiddleware<QuantaInstant>>
where
    K: tower_governor::key_extractor::KeyExtractor,
{
    builder
        .per_millisecond(replenish_interval_ms(settings.per_second))
        .burst_size(settings.burst.max(1))
        .finish()
        .expect("rate limit quota is non-zero")
}

/// Milliseconds between two replenished tokens for a rate of `per_second`.
fn replenish_interval_ms(per_second: u64) -> u64 {
    (1000 / per_second.max(1)).max(1)
}
