//! # Admin Maintenance Routes
//!
//! Housekeeping over the auth core's own data. Revocation entries outlive
//! their usefulness the moment the underlying token expires; pruning keeps
//! the list bounded. Admin scope required.

use axum::extract::State;
use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use bullion_core::Role;

use crate::error::ApiError;
use crate::gate::{self, CallerIdentity};
use crate::state::AppState;

/// Result of a revocation-list prune.
#[derive(Debug, Serialize, ToSchema)]
pub struct PruneResponse {
    /// Number of expired entries removed.
    pub pruned: usize,
}

/// Build the admin router, gated behind the authentication middleware.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/v1/admin/revocations/prune", post(prune_revocations))
        .route_layer(from_fn_with_state(state, gate::authenticate))
}

/// POST /v1/admin/revocations/prune — Drop naturally-expired revocations.
#[utoipa::path(
    post,
    path = "/v1/admin/revocations/prune",
    responses(
        (status = 200, description = "Prune complete", body = PruneResponse),
        (status = 401, description = "Missing, expired, or invalid token", body = crate::error::ErrorBody),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
async fn prune_revocations(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Result<Json<PruneResponse>, ApiError> {
    gate::require_scopes(&caller, &[Role::Admin])?;

    let pruned = state.auth.prune_revocations().await?;
    Ok(Json(PruneResponse { pruned }))
}
