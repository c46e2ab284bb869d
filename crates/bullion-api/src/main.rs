//! # bullion-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the Bullion auth API. Configuration is
//! assembled from the environment and validated before anything binds:
//! a missing signing secret or expiry is startup-fatal, never defaulted.

use std::sync::Arc;

use bullion_api::db;
use bullion_api::state::AppState;
use bullion_auth::{
    AuthConfig, AuthService, InMemoryRevocationStore, InMemoryUserStore, RevocationStore,
    UserStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    // Required configuration — absence aborts startup.
    let secret = std::env::var("JWT_SECRET").unwrap_or_default();
    let expiry = std::env::var("JWT_EXPIRES_IN").unwrap_or_default();
    let config = AuthConfig::new(secret, &expiry).map_err(|e| {
        tracing::error!("invalid auth configuration: {e}");
        e
    })?;

    // Store selection: Postgres when DATABASE_URL is set, otherwise
    // in-memory (development only — nothing survives a restart).
    let pool = db::init_pool().await.map_err(|e| {
        tracing::error!("database initialization failed: {e}");
        e
    })?;

    let (users, revocations): (Arc<dyn UserStore>, Arc<dyn RevocationStore>) = match pool {
        Some(pool) => {
            db::ensure_schema(&pool).await.map_err(|e| {
                tracing::error!("schema bootstrap failed: {e}");
                e
            })?;
            tracing::info!("using Postgres-backed stores");
            (
                Arc::new(db::PgUserStore::new(pool.clone())),
                Arc::new(db::PgRevocationStore::new(pool)),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores (development only)");
            (
                Arc::new(InMemoryUserStore::new()),
                Arc::new(InMemoryRevocationStore::new()),
            )
        }
    };

    let service = AuthService::new(&config, users, revocations);
    let app = bullion_api::app(AppState::new(service));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Bullion auth API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
