//! # Session Endpoints
//!
//! The auth core's HTTP surface:
//! - POST /v1/auth/login — credentials in, session envelope out
//! - GET  /v1/auth/validate — bearer token in, sanitized user out
//! - POST /v1/auth/refresh — bearer token in, fresh session out
//! - GET  /v1/auth/me — bearer token in, sanitized user out
//! - POST /v1/auth/logout — bearer token in, revocation + receipt out
//!
//! Handlers extract the bearer themselves (the service operations act on
//! the raw token); the gate middleware guards resource routers elsewhere.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use bullion_auth::{LogoutReceipt, Session};
use bullion_core::AuthUser;

use crate::error::ApiError;
use crate::extractors::{extract_validated_json, Validate};
use crate::gate::bearer_token;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password. Never persisted, never logged.
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("email is required".to_string());
        }
        if !self.email.contains('@') {
            return Err("email must be a valid email address".to_string());
        }
        if self.password.is_empty() {
            return Err("password is required".to_string());
        }
        Ok(())
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/validate", get(validate))
        .route("/v1/auth/refresh", post(refresh))
        .route("/v1/auth/me", get(me))
        .route("/v1/auth/logout", post(logout))
}

/// POST /v1/auth/login — Authenticate credentials and mint a session.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session minted", body = Session),
        (status = 400, description = "Malformed input", body = crate::error::ErrorBody),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorBody),
        (status = 403, description = "Account locked or inactive", body = crate::error::ErrorBody),
    ),
    tag = "auth"
)]
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Session>, ApiError> {
    let req = extract_validated_json(body)?;
    let session = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(session))
}

/// GET /v1/auth/validate — Validate the presented token and return its user.
#[utoipa::path(
    get,
    path = "/v1/auth/validate",
    responses(
        (status = 200, description = "Token valid", body = AuthUser),
        (status = 401, description = "Missing, expired, or invalid token", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthUser>, ApiError> {
    let token = bearer_token(&headers)?;
    Ok(Json(state.auth.current_user(token).await?))
}

/// POST /v1/auth/refresh — Exchange a valid token for a fresh session.
#[utoipa::path(
    post,
    path = "/v1/auth/refresh",
    responses(
        (status = 200, description = "Fresh session minted", body = Session),
        (status = 401, description = "Missing, expired, or invalid token", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Session>, ApiError> {
    let token = bearer_token(&headers)?;
    Ok(Json(state.auth.refresh_token(token).await?))
}

/// GET /v1/auth/me — Return the sanitized current user.
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = AuthUser),
        (status = 401, description = "Missing, expired, or invalid token", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthUser>, ApiError> {
    let token = bearer_token(&headers)?;
    Ok(Json(state.auth.current_user(token).await?))
}

/// POST /v1/auth/logout — Revoke the presented token.
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 200, description = "Token revoked", body = LogoutReceipt),
        (status = 401, description = "Missing, expired, or invalid token", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutReceipt>, ApiError> {
    let token = bearer_token(&headers)?;
    Ok(Json(state.auth.logout(token).await?))
}
