//! No-op geolocation for deployments without a GeoIP database.

use super::service::GeoLocator;
use std::net::IpAddr;
use tracing::debug;

/// A locator that never resolves anything.
pub struct NullGeoLocator;

impl NullGeoLocator {
    /// Creates a new NullGeoLocator instance.
    pub fn new() -> Self {
        debug!("Using NullGeoLocator (geolocation disabled)");
        Self
    }
}

impl Default for NullGeoLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoLocator for NullGeoLocator {
    fn locate(&self, _ip: IpAddr) -> Option<String> {
        None
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
