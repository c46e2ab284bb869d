//! # Session Envelope
//!
//! The stateless session: everything the client needs lives in the envelope
//! and the signed token. Server-side truth is the signature + claims, except
//! for the revocation list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use bullion_core::AuthUser;

/// Response envelope for login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    /// The signed bearer token.
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    /// Absolute expiry, matching the token's `exp` claim exactly.
    pub expires_at: DateTime<Utc>,
    /// Issuance time, matching the token's `iat` claim exactly.
    pub issued_at: DateTime<Utc>,
    /// Sanitized view of the authenticated user.
    pub user: AuthUser,
}

/// Confirmation returned by logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogoutReceipt {
    /// Human-readable confirmation.
    pub message: String,
}
