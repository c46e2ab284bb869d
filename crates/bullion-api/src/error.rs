//! # API Error Mapping
//!
//! Maps [`AuthError`] codes to HTTP responses with the structured JSON
//! error body used across the API surface. TOKEN_EXPIRED and TOKEN_INVALID
//! both answer 401 but stay distinguishable in the body so clients can
//! decide whether a refresh is worth attempting. Internal error details are
//! logged server-side and never reach a client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use bullion_auth::AuthError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "TOKEN_EXPIRED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Response-layer wrapper around [`AuthError`].
///
/// Handlers return `Result<Json<T>, ApiError>`; the `From` impl lets `?`
/// carry auth-core errors straight to the boundary.
#[derive(Debug)]
pub struct ApiError(pub AuthError);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status for the wrapped error code.
    fn status(&self) -> StatusCode {
        match &self.0 {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::TokenMissing
            | AuthError::TokenExpired
            | AuthError::TokenInvalid => StatusCode::UNAUTHORIZED,
            AuthError::AccountLocked
            | AuthError::UserInactive
            | AuthError::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Never expose internal error messages to clients.
        let message = match &self.0 {
            AuthError::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self.0, AuthError::Internal(_)) {
            tracing::error!(error = %self.0, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.0.code().to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}
