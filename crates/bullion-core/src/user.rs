//! # User Records & the Sanitized Auth View
//!
//! [`UserRecord`] is the narrow read-mostly shape the auth core consults in
//! the external user store; the auth core writes only `last_login`.
//! [`AuthUser`] is the sanitized view that crosses the API boundary — no
//! password hash, no status, and its constructor is the enforcement point
//! for the non-empty-field integrity invariant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DomainError;
use crate::role::Role;
use crate::status::AccountStatus;

/// A user row as read from the external user store.
///
/// `password_hash` holds a PHC-format string and never leaves this type
/// except into the credential verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Primary key.
    pub id: Uuid,
    /// Unique login email.
    pub email: String,
    /// PHC-format password hash.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Platform role, frozen into token claims at issuance.
    pub role: Role,
    /// Account lifecycle status.
    pub status: AccountStatus,
    /// Timestamp of the most recent successful login, if any.
    pub last_login: Option<DateTime<Utc>>,
}

/// Sanitized user view embedded in session envelopes and returned by the
/// identity endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthUser {
    /// User ID.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Platform role.
    pub role: Role,
}

impl AuthUser {
    /// Build the sanitized view from a stored record.
    ///
    /// An empty email, first name, or last name is a data-integrity
    /// violation in the backing store and is reported as a hard error —
    /// callers must not paper over it with defaults.
    pub fn from_record(record: &UserRecord) -> Result<Self, DomainError> {
        Self::from_record_with_role(record, record.role)
    }

    /// Build the sanitized view with an explicit role.
    ///
    /// Used by token refresh, where the role claim is carried over from the
    /// old token rather than re-read from the record.
    pub fn from_record_with_role(record: &UserRecord, role: Role) -> Result<Self, DomainError> {
        let required = [
            ("email", &record.email),
            ("first_name", &record.first_name),
            ("last_name", &record.last_name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::Integrity {
                    id: record.id,
                    field,
                });
            }
        }

        Ok(Self {
            id: record.id,
            email: record.email.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            email: "ada@bullion.test".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: Role::Investor,
            status: AccountStatus::Active,
            last_login: None,
        }
    }

    #[test]
    fn sanitized_view_strips_hash_and_status() {
        let rec = record();
        let user = AuthUser::from_record(&rec).unwrap();
        assert_eq!(user.id, rec.id);
        assert_eq!(user.email, rec.email);
        assert_eq!(user.role, Role::Investor);

        // The serialized view must not contain the hash.
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
        assert!(!json.contains("status"));
    }

    #[test]
    fn empty_first_name_is_integrity_error() {
        let mut rec = record();
        rec.first_name = "  ".to_string();
        let err = AuthUser::from_record(&rec).unwrap_err();
        assert_eq!(
            err,
            DomainError::Integrity {
                id: rec.id,
                field: "first_name"
            }
        );
    }

    #[test]
    fn empty_last_name_is_integrity_error() {
        let mut rec = record();
        rec.last_name = String::new();
        assert!(matches!(
            AuthUser::from_record(&rec),
            Err(DomainError::Integrity {
                field: "last_name",
                ..
            })
        ));
    }

    #[test]
    fn empty_email_is_integrity_error() {
        let mut rec = record();
        rec.email = String::new();
        assert!(matches!(
            AuthUser::from_record(&rec),
            Err(DomainError::Integrity { field: "email", .. })
        ));
    }

    #[test]
    fn role_override_is_respected() {
        let rec = record();
        let user = AuthUser::from_record_with_role(&rec, Role::Admin).unwrap();
        assert_eq!(user.role, Role::Admin);
    }
}
