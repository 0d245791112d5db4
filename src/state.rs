//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::config::ServiceSettings;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::audit::AuditLog;
use crate::infrastructure::geo::GeoLocator;

/// Services and handles shared by all requests.
///
/// Cloning is cheap: every field is reference-counted or a channel handle.
/// Nothing here caches link records between requests; every read goes to
/// the store.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub stats_service: Arc<StatsService>,
    pub audit: AuditLog,
    /// Name of the active geolocation backend, reported by `/health`.
    pub geo_backend: &'static str,
    /// When true, client IPs come from X-Forwarded-For / X-Real-IP.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services around one store, one geolocator and one audit log.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        geo: Arc<dyn GeoLocator>,
        audit: AuditLog,
        settings: &ServiceSettings,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            repository.clone(),
            audit.clone(),
            settings,
        ));
        let redirect_service = Arc::new(RedirectService::new(
            repository.clone(),
            geo.clone(),
            audit.clone(),
            settings.visit_policy,
            settings.store_timeout,
        ));
        let stats_service = Arc::new(StatsService::new(repository, settings.store_timeout));

        Self {
            link_service,
            redirect_service,
            stats_service,
            audit,
            geo_backend: geo.name(),
            behind_proxy: settings.behind_proxy,
        }
    }
}
