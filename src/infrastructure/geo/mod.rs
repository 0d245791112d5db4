//! IP-to-country lookup used to tag click events.
//!
//! Provides a [`GeoLocator`] trait with two implementations:
//! - [`MaxMindGeoLocator`] - Local MaxMind GeoLite2/GeoIP2 database
//! - [`NullGeoLocator`] - No-op implementation when no database is configured

mod maxmind;
mod null_geo;
mod service;

pub use maxmind::MaxMindGeoLocator;
pub use null_geo::NullGeoLocator;
pub use service::GeoLocator;
