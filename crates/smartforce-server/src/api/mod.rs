//! Application state, router assembly and the unversioned endpoints

pub mod extract;
pub mod response;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use std::{future::Future, sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::Notify};
use tower_http::compression::CompressionLayer;

use crate::{
    auth::TokenService,
    cache::SharedCache,
    config::Config,
    db, features,
    metrics::{metrics_handler, Metrics, MetricsLayer},
    middleware,
};

/// Application state shared across handlers
///
/// Handlers extract the piece they need (`State<SqlitePool>`,
/// `State<SharedCache>`, ...) through [`FromRef`].
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: SqlitePool,
    pub tokens: Arc<TokenService>,
    pub cache: SharedCache,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: &Config) -> anyhow::Result<Self> {
        let cache = if config.cache.enabled {
            SharedCache::memory(Duration::from_secs(config.cache.ttl_secs))
        } else {
            tracing::info!("Caching disabled");
            SharedCache::disabled()
        };

        Ok(Self {
            db,
            tokens: Arc::new(TokenService::from_config(&config.auth)),
            cache,
            metrics: Arc::new(Metrics::new()?),
        })
    }
}

/// Create the application router with all routes and middleware
///
/// Rate limiting covers `/api/v1` only, so health probes and metric scrapes
/// are never throttled.
pub fn create_router(state: AppState, config: &Config) -> anyhow::Result<Router> {
    let api_v1 = middleware::rate_limit::with_rate_limit(features::router(), &config.rate_limit)?;

    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1", api_v1)
        .layer(MetricsLayer::new(state.metrics.clone()))
        .with_state(state)
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
        .layer(middleware::security_headers_layer())
        .layer(middleware::request_id_layer());

    Ok(router)
}

/// Serve `app` until `signal` resolves, then drain open connections.
///
/// Connections still open `drain_timeout` after the signal are dropped.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let draining = Arc::new(Notify::new());

    let mut server = tokio::spawn({
        let draining = draining.clone();
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    signal.await;
                    draining.notify_one();
                })
                .await
        }
    });

    tokio::select! {
        result = &mut server => result??,
        _ = draining.notified() => {
            tracing::info!(
                timeout_secs = drain_timeout.as_secs(),
                "Waiting for open connections to close"
            );
            match tokio::time::timeout(drain_timeout, &mut server).await {
                Ok(result) => result??,
                Err(_) => {
                    tracing::warn!("Shutdown timeout reached, dropping open connections");
                    server.abort();
                },
            }
        },
    }

    Ok(())
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "SmartForce API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Health check handler
///
/// `200` with `"status": "healthy"` when the database answers, `503` otherwise.
async fn health(State(pool): State<SqlitePool>) -> Response {
    let (status, health, database) = match db::health_check(&pool).await {
        Ok(()) => (StatusCode::OK, "healthy", "connected"),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "disconnected")
        },
    };

    (
        status,
        Json(json!({
            "status": health,
            "timestamp": Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION"),
            "database": database
        })),
    )
        .into_response()
}
