//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, geolocation and audit setup, and the Axum server
//! lifecycle including graceful shutdown.

use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::audit::AuditLog;
use crate::infrastructure::geo::{GeoLocator, MaxMindGeoLocator, NullGeoLocator};
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (PostgreSQL with migrations, or in-memory)
/// - Geolocation (MaxMind database, or none)
/// - Audit log writer
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = open_repository(&config).await?;
    let geo = open_geo_locator(&config);

    let (audit, audit_writer) = match &config.audit_log_path {
        Some(path) => {
            let (audit, handle) = AuditLog::spawn(path.clone(), config.audit_queue_capacity);
            tracing::info!("Audit log enabled: {}", path.display());
            (audit, Some(handle))
        }
        None => {
            tracing::info!("Audit log disabled");
            (AuditLog::disabled(), None)
        }
    };

    let state = AppState::new(
        repository.clone(),
        geo,
        audit,
        &config.service_settings(),
    );

    let app = app_router(state, &config.rate_limit_settings());

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router owned the last audit handles; the writer drains and exits.
    if let Some(handle) = audit_writer
        && tokio::time::timeout(Duration::from_secs(5), handle).await.is_err()
    {
        tracing::warn!("Audit writer did not finish within 5s");
    }

    repository.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Selects the link store: PostgreSQL when a database URL is configured,
/// otherwise process memory.
pub async fn open_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, links are kept in memory and lost on restart");
        return Ok(Arc::new(MemoryLinkRepository::new()));
    };

    let pool = connect_with_retry(database_url, config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(Arc::new(PgLinkRepository::new(Arc::new(pool))))
}

/// Connects to PostgreSQL, retrying with jittered exponential backoff.
async fn connect_with_retry(database_url: &str, config: &Config) -> Result<PgPool> {
    let strategy = ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(10))
        .map(jitter)
        .take(config.db_connect_retries);

    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout));

    Retry::spawn(strategy, || {
        let options = options.clone();
        async move {
            options.connect(database_url).await.inspect_err(|e| {
                tracing::warn!("Database connection attempt failed: {}", e);
            })
        }
    })
    .await
    .context("Failed to connect to database")
}

fn open_geo_locator(config: &Config) -> Arc<dyn GeoLocator> {
    let Some(path) = &config.geoip_db_path else {
        tracing::info!("GeoIP disabled, click locations will be 'unknown'");
        return Arc::new(NullGeoLocator::new());
    };

    match MaxMindGeoLocator::open(&path.to_string_lossy()) {
        Ok(locator) => Arc::new(locator),
        Err(e) => {
            tracing::warn!(
                "Failed to open GeoIP database {}: {}. Continuing without geolocation.",
                path.display(),
                e
            );
            Arc::new(NullGeoLocator::new())
        }
    }
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
