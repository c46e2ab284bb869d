//! # Session Orchestrator
//!
//! Composes the credential verifier, token codec, and stores into the five
//! session operations: login, validate, refresh, current-user, logout.
//! Every operation returns a typed result; store calls are bounded by the
//! configured timeout and map to INTERNAL_ERROR rather than hanging.
//!
//! ## Ordering Invariant
//!
//! Token validation always checks the revocation list **before** the
//! signature/expiry verification, and liveness re-checks (refresh,
//! current-user) run after both. Short-circuiting this order is a
//! correctness bug, not an optimization.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use bullion_core::AuthUser;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::session::{LogoutReceipt, Session};
use crate::store::{RevocationStore, StoreError, UserStore};
use crate::token::{TokenClaims, TokenCodec};
use crate::verifier::CredentialVerifier;

/// Revocation horizon used when a token's `exp` claim cannot be represented
/// as a timestamp.
const FALLBACK_REVOCATION_TTL_HOURS: i64 = 24;

/// The session lifecycle service.
///
/// Stateless across requests — the signing secret and expiry are fixed at
/// construction, every operation is independently concurrent, and the only
/// shared mutable resource is the revocation store.
pub struct AuthService {
    verifier: CredentialVerifier,
    codec: TokenCodec,
    users: Arc<dyn UserStore>,
    revocations: Arc<dyn RevocationStore>,
    store_timeout: Duration,
}

impl AuthService {
    /// Build the service from validated configuration and store handles.
    pub fn new(
        config: &AuthConfig,
        users: Arc<dyn UserStore>,
        revocations: Arc<dyn RevocationStore>,
    ) -> Self {
        Self {
            verifier: CredentialVerifier::new(Arc::clone(&users), config.store_timeout()),
            codec: TokenCodec::new(config),
            users,
            revocations,
            store_timeout: config.store_timeout(),
        }
    }

    /// Authenticate credentials and mint a session.
    ///
    /// Input validation runs before any store lookup.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        validate_login_input(email, password)?;

        let user = self.verifier.verify(email, password).await?;
        let auth_user = AuthUser::from_record(&user)?;

        let session = self.codec.issue(&auth_user).map_err(AuthError::from)?;
        tracing::info!(user_id = %auth_user.id, role = %auth_user.role, "login succeeded");
        Ok(session)
    }

    /// Validate a token: revocation list first, then signature and expiry.
    pub async fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let revoked = self
            .bounded("revocation lookup", self.revocations.is_revoked(token))
            .await?;
        if revoked {
            return Err(AuthError::TokenInvalid);
        }

        self.codec.decode(token).map_err(AuthError::from)
    }

    /// Exchange a valid token for a fresh session.
    ///
    /// The user must still exist and be active, but the new token's role is
    /// copied from the **old token's claims**, not the re-resolved record.
    /// A role change mid-session therefore does not flicker into refreshed
    /// tokens; it takes effect at the next full login. The old token is not
    /// revoked — it remains valid until its own expiry.
    pub async fn refresh_token(&self, token: &str) -> Result<Session, AuthError> {
        let claims = self.validate_token(token).await?;

        let user = self
            .bounded("user lookup", self.users.find_by_email(&claims.email))
            .await?;
        let Some(user) = user else {
            return Err(AuthError::UserInactive);
        };
        if !user.status.is_active() {
            return Err(AuthError::UserInactive);
        }

        let auth_user = AuthUser::from_record_with_role(&user, claims.role)?;
        let session = self.codec.issue(&auth_user).map_err(AuthError::from)?;
        tracing::info!(user_id = %auth_user.id, "token refreshed");
        Ok(session)
    }

    /// Resolve the sanitized current user for a token.
    ///
    /// Re-checks liveness against the store with the same status mapping as
    /// login. Mints nothing.
    pub async fn current_user(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = self.validate_token(token).await?;

        let user = self
            .bounded("user lookup", self.users.find_by_email(&claims.email))
            .await?;
        let Some(user) = user else {
            return Err(AuthError::UserInactive);
        };
        if !user.status.is_active() {
            return Err(if user.status.is_lockout() {
                AuthError::AccountLocked
            } else {
                AuthError::UserInactive
            });
        }

        Ok(AuthUser::from_record(&user)?)
    }

    /// Revoke a token until its natural expiry.
    ///
    /// The token must still validate — logout of an already-expired or
    /// already-revoked token surfaces the validator's error, so a second
    /// logout of the same token returns TOKEN_INVALID, not success.
    pub async fn logout(&self, token: &str) -> Result<LogoutReceipt, AuthError> {
        let claims = self.validate_token(token).await?;

        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .unwrap_or_else(|| Utc::now() + chrono::Duration::hours(FALLBACK_REVOCATION_TTL_HOURS));

        self.bounded(
            "revocation insert",
            self.revocations.revoke(token, expires_at),
        )
        .await?;

        tracing::info!(user_id = %claims.id, "session revoked");
        Ok(LogoutReceipt {
            message: "Logged out successfully".to_string(),
        })
    }

    /// Drop revocation entries whose tokens have expired naturally.
    pub async fn prune_revocations(&self) -> Result<usize, AuthError> {
        let pruned = self
            .bounded("revocation prune", self.revocations.prune_expired())
            .await?;
        if pruned > 0 {
            tracing::info!(pruned, "expired revocation entries removed");
        }
        Ok(pruned)
    }

    /// Bound a store call by the configured timeout; a timeout or store
    /// failure maps to INTERNAL_ERROR with the cause preserved.
    async fn bounded<T>(
        &self,
        what: &'static str,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, AuthError> {
        match tokio::time::timeout(self.store_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(AuthError::Internal(format!("{what} failed: {err}"))),
            Err(_) => Err(AuthError::Internal(format!("{what} timed out"))),
        }
    }
}

/// Reject malformed login input before anything touches a store.
fn validate_login_input(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::Validation("email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(AuthError::Validation(
            "email must be a valid email address".to_string(),
        ));
    }
    if password.is_empty() {
        return Err(AuthError::Validation("password is required".to_string()));
    }
    Ok(())
}
