//! # Domain Errors
//!
//! Structured errors for domain-type resolution and integrity checks.

use thiserror::Error;

/// Errors raised while resolving or validating foundational domain types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A role string did not match any variant of the closed role enum.
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// An account-status string did not match any known status.
    #[error("unknown account status: {0}")]
    UnknownStatus(String),

    /// A stored user record violates a data-integrity invariant.
    /// The offending field is named; the value is not echoed back.
    #[error("user record {id} failed integrity check: {field} must be non-empty")]
    Integrity {
        /// ID of the offending record.
        id: uuid::Uuid,
        /// Name of the empty field.
        field: &'static str,
    },
}
