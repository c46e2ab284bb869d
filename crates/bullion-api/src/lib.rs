//! # bullion-api — Axum API Surface for the Bullion Auth Core
//!
//! The HTTP boundary for authentication and session lifecycle. The wider
//! platform (catalog, positions, portfolios, transactions, payments) mounts
//! its resource routers behind the same [`gate`] middleware; this crate
//! ships the auth surface itself.
//!
//! ## API Surface
//!
//! | Route                          | Module            | Notes                    |
//! |--------------------------------|-------------------|--------------------------|
//! | `POST /v1/auth/login`          | [`routes::auth`]  | public                   |
//! | `GET  /v1/auth/validate`       | [`routes::auth`]  | bearer                   |
//! | `POST /v1/auth/refresh`        | [`routes::auth`]  | bearer                   |
//! | `GET  /v1/auth/me`             | [`routes::auth`]  | bearer                   |
//! | `POST /v1/auth/logout`         | [`routes::auth`]  | bearer                   |
//! | `POST /v1/admin/revocations/prune` | [`routes::admin`] | gate, admin scope    |
//! | `GET  /health/*`               | —                 | unauthenticated probes   |
//! | `GET  /openapi.json`           | [`openapi`]       | generated spec           |

pub mod db;
pub mod error;
pub mod extractors;
pub mod gate;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes are mounted outside every middleware so they remain
/// accessible without credentials.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::auth::router())
        .merge(routes::admin::router(state.clone()))
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
