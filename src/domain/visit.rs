//! Request context captured for a redirect.

use std::net::IpAddr;

/// Ambient request data needed to record a visit.
///
/// Built by the redirect handler from headers and the peer address, then
/// consumed by [`crate::application::services::RedirectService`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitContext {
    pub referrer: Option<String>,
    pub client_ip: Option<IpAddr>,
}

impl VisitContext {
    pub fn new(referrer: Option<&str>, client_ip: Option<IpAddr>) -> Self {
        Self {
            referrer: referrer.map(|s| s.to_string()),
            client_ip,
        }
    }
}
