#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use shorturls::application::services::VisitRecordingPolicy;
use shorturls::config::{RateLimitSettings, ServiceSettings};
use shorturls::domain::entities::{ClickEvent, NewShortLink, ShortLink};
use shorturls::domain::repositories::{LinkRepository, StoreError};
use shorturls::infrastructure::audit::AuditLog;
use shorturls::infrastructure::geo::{GeoLocator, NullGeoLocator};
use shorturls::infrastructure::persistence::MemoryLinkRepository;
use shorturls::routes::router;
use shorturls::state::AppState;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower::Layer;

pub const BASE_URL: &str = "http://sho.rt";

/// Inserts a fixed peer address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "81.2.69.160:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// Answers every lookup with the same country code.
pub struct FixedGeo(pub &'static str);

impl GeoLocator for FixedGeo {
    fn locate(&self, _ip: IpAddr) -> Option<String> {
        Some(self.0.to_string())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// In-memory store whose click appends always fail.
pub struct FailingClicksRepository {
    inner: MemoryLinkRepository,
}

impl FailingClicksRepository {
    pub fn new() -> Self {
        Self {
            inner: MemoryLinkRepository::new(),
        }
    }
}

#[async_trait]
impl LinkRepository for FailingClicksRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        self.inner.insert(new_link).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        self.inner.find_by_code(code).await
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, StoreError> {
        self.inner.exists_by_code(code).await
    }

    async fn append_click(&self, _code: &str, _click: ClickEvent) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("click table locked".to_string()))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        self.inner.count().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }

    async fn close(&self) {}
}

/// Store that fails every call, for health and error rendering checks.
pub struct DownRepository;

#[async_trait]
impl LinkRepository for DownRepository {
    async fn insert(&self, _new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        Err(StoreError::Unavailable("connection refused to 10.0.0.5".to_string()))
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<ShortLink>, StoreError> {
        Err(StoreError::Unavailable("connection refused to 10.0.0.5".to_string()))
    }

    async fn exists_by_code(&self, _code: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused to 10.0.0.5".to_string()))
    }

    async fn append_click(&self, _code: &str, _click: ClickEvent) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused to 10.0.0.5".to_string()))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable("connection refused to 10.0.0.5".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused to 10.0.0.5".to_string()))
    }

    async fn close(&self) {}
}

pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        base_url: BASE_URL.to_string(),
        ..ServiceSettings::default()
    }
}

/// Generous limits so tests never trip the rate limiter by accident.
pub fn relaxed_rate_limit() -> RateLimitSettings {
    RateLimitSettings {
        per_second: 1000,
        burst: 10_000,
        behind_proxy: false,
    }
}

pub fn create_state_with(
    repository: Arc<dyn LinkRepository>,
    geo: Arc<dyn GeoLocator>,
    policy: VisitRecordingPolicy,
) -> AppState {
    let settings = ServiceSettings {
        visit_policy: policy,
        ..test_settings()
    };

    AppState::new(repository, geo, AuditLog::disabled(), &settings)
}

/// State over a fresh in-memory store; the store is returned for seeding.
pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let state = create_state_with(
        repo.clone(),
        Arc::new(NullGeoLocator::new()),
        VisitRecordingPolicy::FailClosed,
    );

    (state, repo)
}

pub fn test_app(state: AppState) -> Router {
    router(state, &relaxed_rate_limit()).layer(MockConnectInfoLayer)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(test_app(state)).unwrap()
}

/// Seeds a link valid from `created_at` for `validity_minutes`.
pub async fn create_test_link(
    repo: &MemoryLinkRepository,
    code: &str,
    url: &str,
    created_at: DateTime<Utc>,
    validity_minutes: u32,
) -> ShortLink {
    repo.insert(NewShortLink::with_validity(
        code.to_string(),
        url.to_string(),
        created_at,
        validity_minutes,
    ))
    .await
    .unwrap()
}

/// Seeds a link that expired an hour ago.
pub async fn create_expired_link(repo: &MemoryLinkRepository, code: &str, url: &str) -> ShortLink {
    create_test_link(repo, code, url, Utc::now() - chrono::Duration::hours(2), 60).await
}
