//! # Credential Verifier
//!
//! Email/password verification against the user store. The outcome order is
//! fixed: unknown email and wrong password collapse into the same
//! INVALID_CREDENTIALS result, the account-status gate runs before the hash
//! comparison, and the hash comparison runs on the blocking pool.

use std::sync::Arc;
use std::time::Duration;

use bullion_core::UserRecord;

use crate::error::AuthError;
use crate::password::{self, PasswordError};
use crate::store::UserStore;

/// Verifies credentials and records successful logins.
pub struct CredentialVerifier {
    users: Arc<dyn UserStore>,
    store_timeout: Duration,
}

impl CredentialVerifier {
    /// Build a verifier over the given user store.
    pub fn new(users: Arc<dyn UserStore>, store_timeout: Duration) -> Self {
        Self {
            users,
            store_timeout,
        }
    }

    /// Verify an email/password pair.
    ///
    /// - Unknown email → `InvalidCredentials` (existence is never revealed).
    /// - Non-active status → `AccountLocked` for {locked, blocked,
    ///   suspended}, `UserInactive` otherwise.
    /// - Hash mismatch → `InvalidCredentials`.
    ///
    /// On success the `last_login` update is best-effort: a failure there is
    /// logged and swallowed, never surfaced to the caller.
    pub async fn verify(&self, email: &str, password: &str) -> Result<UserRecord, AuthError> {
        let lookup = tokio::time::timeout(self.store_timeout, self.users.find_by_email(email))
            .await
            .map_err(|_| AuthError::Internal("user lookup timed out".to_string()))?
            .map_err(AuthError::from)?;

        let Some(user) = lookup else {
            return Err(AuthError::InvalidCredentials);
        };

        if !user.status.is_active() {
            return Err(if user.status.is_lockout() {
                AuthError::AccountLocked
            } else {
                AuthError::UserInactive
            });
        }

        let matched =
            password::verify_blocking(user.password_hash.clone(), password.to_string())
                .await
                .map_err(|e| match e {
                    // A stored hash that does not parse is server-side data
                    // corruption, not a bad credential.
                    PasswordError::InvalidHash(msg) => {
                        AuthError::Internal(format!("stored hash for user {}: {msg}", user.id))
                    }
                    other => AuthError::Internal(other.to_string()),
                })?;

        if !matched {
            return Err(AuthError::InvalidCredentials);
        }

        match tokio::time::timeout(self.store_timeout, self.users.update_last_login(user.id)).await
        {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(user_id = %user.id, error = %err, "failed to update last_login");
            }
            Err(_) => {
                tracing::warn!(user_id = %user.id, "last_login update timed out");
            }
        }

        Ok(user)
    }
}
