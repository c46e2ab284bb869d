//! # Request Extraction & Validation
//!
//! Provides the [`Validate`] trait for request DTOs and a helper to extract
//! + validate JSON bodies. A body that fails to parse or validate is a
//! VALIDATION_ERROR (400) before any store is touched.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use bullion_auth::AuthError;

use crate::error::ApiError;

/// Trait for request types that validate business rules beyond what serde
/// deserialization checks.
pub trait Validate {
    /// Validate business rules. Returns an error message on failure.
    fn validate(&self) -> Result<(), String>;
}

/// Extract a JSON body, mapping deserialization failures (missing fields,
/// malformed JSON) to VALIDATION_ERROR.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| ApiError(AuthError::Validation(err.body_text())))
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    let value = extract_json(result)?;
    value
        .validate()
        .map_err(|msg| ApiError(AuthError::Validation(msg)))?;
    Ok(value)
}
