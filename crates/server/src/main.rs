//! nutri-server: health assistant HTTP server binary entrypoint.

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nutri_server::config::Config;

#[tokio::main]
async fn main() {
    // Load configuration (reads .env when present)
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let fallbacks = nutri_server::load_fallbacks(&config).expect("Failed to load fallback table");
    match &config.fallbacks_path {
        Some(path) => tracing::info!(path = %path.display(), "Loaded fallback table from file"),
        None => tracing::info!("Using embedded fallback table"),
    }

    // Create database pool and make sure the tables exist
    let pool = nutri_server::db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    nutri_server::db::init_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    let live = config
        .groq_api_key
        .as_deref()
        .is_some_and(nutri_server::ai::client::usable_key);
    if live {
        tracing::info!(model = %config.completion_model, "Completion API key configured, AI features live");
    } else {
        tracing::warn!("GROQ_API_KEY not set, AI features will serve fallback data");
    }
    tracing::info!("Rate limiting: {} requests/second", config.rate_limit_rps);

    let app = nutri_server::build_app(pool, &config, fallbacks);

    let addr: SocketAddr = config.bind_address.parse().expect("Invalid bind address");
    tracing::info!(project = %config.project_name, "Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shutdown complete");
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
