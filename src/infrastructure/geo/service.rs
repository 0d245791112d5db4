//! Geolocation trait.

use std::net::IpAddr;

/// Resolves a client address to a coarse region identifier.
///
/// Implementations are black boxes to the redirect flow: any failure, private
/// address, or missing record is reported as `None`, which the click ledger
/// records as `"unknown"`.
///
/// # Implementations
///
/// - [`crate::infrastructure::geo::MaxMindGeoLocator`] - ISO country code from an `.mmdb` file
/// - [`crate::infrastructure::geo::NullGeoLocator`] - Always `None`
pub trait GeoLocator: Send + Sync {
    /// Returns the ISO 3166-1 alpha-2 country code for `ip`, if known.
    fn locate(&self, ip: IpAddr) -> Option<String>;

    /// Short provider name for logs and health output.
    fn name(&self) -> &'static str;
}
