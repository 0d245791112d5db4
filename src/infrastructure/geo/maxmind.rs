//! MaxMind database backed geolocation.

use super::service::GeoLocator;
use maxminddb::{Reader, geoip2};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, trace};

/// Country lookup against a GeoLite2/GeoIP2 Country or City database.
///
/// The database is read fully into memory at startup and shared between
/// requests; lookups are synchronous and lock-free.
#[derive(Clone)]
pub struct MaxMindGeoLocator {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindGeoLocator {
    /// Opens the `.mmdb` file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or is not a valid MaxMind database.
    pub fn open(path: &str) -> Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        info!(path, "GeoIP database loaded");

        Ok(Self {
            reader: Arc::new(reader),
        })
    }
}

impl GeoLocator for MaxMindGeoLocator {
    fn locate(&self, ip: IpAddr) -> Option<String> {
        let result = self.reader.lookup(ip).ok()?;
        // City databases are a superset of Country, so this decode works for both.
        let country: geoip2::Country = result.decode().ok()??;
        let iso_code = country.country.iso_code.map(String::from);

        trace!(%ip, country = ?iso_code, "GeoIP lookup");
        iso_code
    }

    fn name(&self) -> &'static str {
        "maxmind"
    }
}
