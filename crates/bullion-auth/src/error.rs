//! # Auth Error Codes
//!
//! Typed result codes for every expected failure of the auth core. Expected
//! failures are values, never panics; unexpected failures funnel into
//! [`AuthError::Internal`] with the diagnostic cause preserved in the
//! message (logged server-side, never returned to clients).

use thiserror::Error;

use bullion_core::DomainError;

use crate::store::StoreError;

/// Every failure the auth core can report.
///
/// `INVALID_CREDENTIALS` deliberately covers both unknown email and wrong
/// password so responses cannot be used to enumerate accounts.
/// `TOKEN_EXPIRED` and `TOKEN_INVALID` stay distinct so clients can decide
/// whether a refresh attempt is worthwhile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Malformed request input, rejected before any store lookup.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown email or wrong password — identical on purpose.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Account status is locked, blocked, or suspended.
    #[error("account is locked")]
    AccountLocked,

    /// Account exists but is not active (deleted, inactive, pending, …).
    #[error("account is not active")]
    UserInactive,

    /// No bearer token was presented at all.
    #[error("no token provided")]
    TokenMissing,

    /// Token signature verified but the token is past its expiry.
    #[error("token has expired")]
    TokenExpired,

    /// Token is revoked, malformed, or carries a bad signature.
    #[error("invalid token")]
    TokenInvalid,

    /// Authenticated, but the caller's role is outside the required scope.
    #[error("insufficient permissions: {0}")]
    InsufficientPermissions(String),

    /// Store, configuration, or unexpected failure. The message carries the
    /// cause for server-side logs and must never reach a client verbatim.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Machine-readable error code, stable across the API surface.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountLocked => "ACCOUNT_LOCKED",
            Self::UserInactive => "USER_INACTIVE",
            Self::TokenMissing => "TOKEN_MISSING",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::InsufficientPermissions(_) => "INSUFFICIENT_PERMISSIONS",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Store failures always fail closed.
impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain integrity violations (empty names, unknown roles in stored data)
/// are server-side data corruption, never a client problem.
impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(AuthError::Validation("x".into()).code(), "VALIDATION_ERROR");
        assert_eq!(AuthError::InvalidCredentials.code(), "INVALID_CREDENTIALS");
        assert_eq!(AuthError::AccountLocked.code(), "ACCOUNT_LOCKED");
        assert_eq!(AuthError::UserInactive.code(), "USER_INACTIVE");
        assert_eq!(AuthError::TokenMissing.code(), "TOKEN_MISSING");
        assert_eq!(AuthError::TokenExpired.code(), "TOKEN_EXPIRED");
        assert_eq!(AuthError::TokenInvalid.code(), "TOKEN_INVALID");
        assert_eq!(
            AuthError::InsufficientPermissions("x".into()).code(),
            "INSUFFICIENT_PERMISSIONS"
        );
        assert_eq!(AuthError::Internal("x".into()).code(), "INTERNAL_ERROR");
    }

    #[test]
    fn invalid_credentials_message_does_not_distinguish_cause() {
        // One message for unknown email and wrong password alike.
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid email or password"
        );
    }

    #[test]
    fn store_error_converts_to_internal() {
        let err: AuthError = StoreError::Unavailable("connection refused".into()).into();
        match err {
            AuthError::Internal(msg) => assert!(msg.contains("connection refused")),
            other => panic!("expected Internal, got {other:?}"),
        }
    }
}
