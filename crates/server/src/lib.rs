//! nutri-server: HTTP API for the health assistant
//!
//! The router is assembled here so tests can drive it in-process; `main.rs`
//! only loads configuration, prepares the database and serves.

pub mod ai;
pub mod config;
pub mod db;
pub mod error;
mod middleware;
mod password;
mod routes;
pub mod session;

use axum::{Extension, Router, middleware as axum_mw, routing::get};
use deadpool_postgres::Pool;
use nutri_core::{FallbackError, FallbackTable};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use ai::{Assistant, CompletionClient};
use config::Config;
use session::SessionStore;

/// The fallback table named by `FALLBACKS_PATH`, or the embedded one
pub fn load_fallbacks(config: &Config) -> Result<FallbackTable, FallbackError> {
    match &config.fallbacks_path {
        Some(path) => FallbackTable::from_path(path),
        None => FallbackTable::embedded(),
    }
}

/// The application router with every route and middleware layer.
pub fn build_app(pool: Pool, config: &Config, fallbacks: FallbackTable) -> Router {
    build_app_with(
        pool,
        config,
        fallbacks,
        SessionStore::with_idle_timeout(config.session_idle_timeout),
    )
}

/// Same as [`build_app`] but with a caller-owned session store, so tests can log users in directly.
pub fn build_app_with(
    pool: Pool,
    config: &Config,
    fallbacks: FallbackTable,
    sessions: SessionStore,
) -> Router {
    let rate_limiter = middleware::create_rate_limiter(config.rate_limit_rps);

    let client = CompletionClient::new(
        config.groq_api_key.clone(),
        config.completion_url.clone(),
        config.completion_model.clone(),
        config.vision_model.clone(),
    );
    let assistant = Assistant::new(client, fallbacks);

    // Session-protected routes
    let protected_routes =
        routes::protected_routes().layer(axum_mw::from_fn(middleware::auth_middleware));

    // Everything a client can hammer goes through the rate limiter
    let limited_routes = Router::new()
        .merge(routes::auth_routes())
        .merge(protected_routes)
        .layer(axum_mw::from_fn(middleware::rate_limit_middleware))
        .layer(Extension(rate_limiter));

    // Only the first router built in a process installs its recorder; later
    // handles render an empty registry.
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let prometheus_handle = recorder.handle();
    let _ = metrics::set_global_recorder(recorder);

    // No session required
    let public_routes = Router::new()
        .route("/health", get(routes::health::check))
        .route("/metrics", get(routes::metrics::get))
        .route("/pages", get(routes::pages::list))
        .layer(Extension(prometheus_handle));

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(public_routes)
        .merge(limited_routes)
        .with_state(pool)
        .layer(Extension(assistant))
        .layer(Extension(sessions))
        .layer(Extension(config.clone()))
        .layer(axum_mw::from_fn(middleware::audit_middleware))
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_mw::from_fn(middleware::metrics_middleware))
}
