//! # Authorization Gate
//!
//! Request-boundary authentication and role-scope enforcement.
//!
//! ## Flow
//!
//! The gate middleware runs every configured [`AuthScheme`] **concurrently**
//! against the request, commits the earliest success by submission order,
//! and on total failure surfaces the result of the last-initiated attempt —
//! deterministically, with no shared mutable state. The committed
//! [`CallerIdentity`] is injected into request extensions; handlers extract
//! it via `FromRequestParts` and enforce scopes with [`require_scopes`].
//!
//! Scope checks are set-membership: an empty required set means "any
//! authenticated user", and a mismatch is INSUFFICIENT_PERMISSIONS (403) —
//! distinct from the 401 family of authentication failures.

use std::future::Future;

use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use futures::future::join_all;

use bullion_auth::{AuthError, AuthService, TokenClaims};
use bullion_core::Role;

use crate::error::ApiError;
use crate::state::AppState;

// ── CallerIdentity ──────────────────────────────────────────────────────────

/// Identity of the authenticated caller, injected by the gate middleware
/// and available to route handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Decoded claims of the committed token.
    pub claims: TokenClaims,
    /// The raw bearer token, for operations that act on the token itself
    /// (logout, refresh).
    pub token: String,
}

/// Extracts the identity the gate middleware injected into extensions.
/// Returns 401 if no identity is present (middleware didn't run or failed).
#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for CallerIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .ok_or(ApiError(AuthError::TokenMissing))
    }
}

/// Check that the caller's role is inside the required scope set.
///
/// An empty set admits any authenticated caller. There is no role
/// hierarchy — an endpoint names exactly the roles it admits.
pub fn require_scopes(caller: &CallerIdentity, required: &[Role]) -> Result<(), AuthError> {
    if required.is_empty() || required.contains(&caller.claims.role) {
        Ok(())
    } else {
        let allowed: Vec<&str> = required.iter().map(Role::as_str).collect();
        Err(AuthError::InsufficientPermissions(format!(
            "requires one of [{}], caller has '{}'",
            allowed.join(", "),
            caller.claims.role
        )))
    }
}

// ── Bearer extraction ───────────────────────────────────────────────────────

/// Extract the bearer token from the Authorization header.
///
/// A missing header is TOKEN_MISSING — a distinct condition from a header
/// that is present but unusable (wrong scheme, empty token, non-ASCII),
/// which is TOKEN_INVALID. The `"Bearer "` prefix is case-sensitive.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Err(AuthError::TokenMissing);
    };
    let value = value.to_str().map_err(|_| AuthError::TokenInvalid)?;
    let Some(token) = value.strip_prefix("Bearer ") else {
        return Err(AuthError::TokenInvalid);
    };
    if token.is_empty() {
        return Err(AuthError::TokenInvalid);
    }
    Ok(token)
}

// ── Authentication schemes ──────────────────────────────────────────────────

/// One way of authenticating a request. Schemes are evaluated independently
/// and concurrently by the gate; each either produces a full caller identity
/// or a typed failure.
#[async_trait]
pub trait AuthScheme: Send + Sync {
    /// Scheme name for logs.
    fn name(&self) -> &'static str;

    /// Attempt to authenticate the request.
    async fn authenticate(
        &self,
        headers: &HeaderMap,
        auth: &AuthService,
    ) -> Result<CallerIdentity, AuthError>;
}

/// The standard scheme: `Authorization: Bearer <signed token>`.
pub struct BearerScheme;

#[async_trait]
impl AuthScheme for BearerScheme {
    fn name(&self) -> &'static str {
        "bearer"
    }

    async fn authenticate(
        &self,
        headers: &HeaderMap,
        auth: &AuthService,
    ) -> Result<CallerIdentity, AuthError> {
        let token = bearer_token(headers)?;
        let claims = auth.validate_token(token).await?;
        Ok(CallerIdentity {
            claims,
            token: token.to_string(),
        })
    }
}

// ── First-success combinator ────────────────────────────────────────────────

/// Run all attempts concurrently; return the earliest success by submission
/// order, or — if every attempt failed — the result of the last-initiated
/// attempt. `None` only when no attempts were submitted.
///
/// This replaces the racing-promise pattern: ordering comes from the indexed
/// result vector, not from completion timing or a shared failure list.
pub async fn first_success<T, E, F>(attempts: Vec<F>) -> Option<Result<T, E>>
where
    F: Future<Output = Result<T, E>>,
{
    let mut results = join_all(attempts).await;
    if let Some(pos) = results.iter().position(Result::is_ok) {
        return Some(results.swap_remove(pos));
    }
    results.pop()
}

// ── Middleware ───────────────────────────────────────────────────────────────

/// Gate middleware: authenticate via the configured schemes and inject the
/// committed [`CallerIdentity`] for downstream handlers.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let headers = request.headers().clone();
    let attempts: Vec<_> = state
        .schemes
        .iter()
        .map(|scheme| scheme.authenticate(&headers, &state.auth))
        .collect();

    match first_success(attempts).await {
        Some(Ok(identity)) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Some(Err(err)) => {
            // The surfaced failure belongs to the last-initiated scheme.
            let scheme = state.schemes.last().map_or("none", |s| s.name());
            tracing::warn!(scheme, reason = %err, "authentication failed");
            ApiError(err).into_response()
        }
        None => ApiError(AuthError::Internal(
            "no authentication schemes configured".to_string(),
        ))
        .into_response(),
    }
}
