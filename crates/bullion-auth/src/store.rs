//! # Store Contracts
//!
//! The auth core touches persistent state through two narrow contracts:
//! a read-mostly user store (lookup by email, plus the one field the auth
//! core owns — `last_login`) and the revocation store recording
//! revoked-but-unexpired tokens.
//!
//! Tokens are keyed by SHA-256 fingerprint, never stored raw: the
//! revocation list must not double as a bearer-token archive.
//!
//! In-memory implementations back development and tests. The locks are
//! `parking_lot` and are never held across an await point.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use bullion_core::UserRecord;

/// Failures from either store. All of them fail the request closed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A query ran but failed.
    #[error("store query failed: {0}")]
    Query(String),

    /// A row was read but does not parse into a domain type.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Narrow read/write contract against the platform's user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by unique email. `None` means no such user — the
    /// caller decides how much of that to reveal.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Record a successful login. The auth core writes nothing else.
    async fn update_last_login(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Contract for the revocation list.
///
/// Writes need only be atomic per token; revocations of different tokens
/// are independent.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record a token as revoked until its natural expiry.
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Whether a token has been revoked. Entries past their expiry may be
    /// reported either way — expiry is checked by the validator regardless.
    async fn is_revoked(&self, token: &str) -> Result<bool, StoreError>;

    /// Drop entries whose tokens have expired naturally. Returns the number
    /// of entries removed.
    async fn prune_expired(&self) -> Result<usize, StoreError>;
}

/// SHA-256 fingerprint of a token, hex-encoded. The only form in which a
/// token touches the revocation store.
pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut s, b| {
        use std::fmt::Write as _;
        let _ = write!(s, "{b:02x}");
        s
    })
}

// ── In-memory implementations ───────────────────────────────────────────────

/// In-memory user store keyed by email. Development and test backing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user record.
    pub fn insert(&self, record: UserRecord) {
        self.users.write().insert(record.email.clone(), record);
    }

    /// Read a record back (test inspection).
    pub fn get(&self, email: &str) -> Option<UserRecord> {
        self.users.read().get(email).cloned()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().get(email).cloned())
    }

    async fn update_last_login(&self, id: Uuid) -> Result<(), StoreError> {
        let mut guard = self.users.write();
        match guard.values_mut().find(|u| u.id == id) {
            Some(user) => {
                user.last_login = Some(Utc::now());
                Ok(())
            }
            None => Err(StoreError::Query(format!("no user with id {id}"))),
        }
    }
}

/// In-memory revocation list keyed by token fingerprint.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRevocationStore {
    revoked: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemoryRevocationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries (test inspection).
    pub fn len(&self) -> usize {
        self.revoked.read().len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.revoked.read().is_empty()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), StoreError> {
        self.revoked
            .write()
            .insert(token_fingerprint(token), expires_at);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, StoreError> {
        Ok(self
            .revoked
            .read()
            .contains_key(&token_fingerprint(token)))
    }

    async fn prune_expired(&self) -> Result<usize, StoreError> {
        let now = Utc::now();
        let mut guard = self.revoked.write();
        let before = guard.len();
        guard.retain(|_, expires_at| *expires_at > now);
        Ok(before - guard.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bullion_core::{AccountStatus, Role};
    use chrono::Duration;

    fn record(email: &str) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c$h".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: Role::User,
            status: AccountStatus::Active,
            last_login: None,
        }
    }

    #[test]
    fn fingerprint_is_stable_and_hex() {
        let fp = token_fingerprint("some.jwt.token");
        assert_eq!(fp.len(), 64);
        assert_eq!(fp, token_fingerprint("some.jwt.token"));
        assert_ne!(fp, token_fingerprint("other.jwt.token"));
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn user_store_lookup_and_last_login() {
        let store = InMemoryUserStore::new();
        let rec = record("lookup@bullion.test");
        let id = rec.id;
        store.insert(rec);

        let found = store.find_by_email("lookup@bullion.test").await.unwrap();
        assert!(found.is_some());
        assert!(found.unwrap().last_login.is_none());

        store.update_last_login(id).await.unwrap();
        let found = store
            .find_by_email("lookup@bullion.test")
            .await
            .unwrap()
            .unwrap();
        assert!(found.last_login.is_some());

        assert!(store
            .find_by_email("nobody@bullion.test")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn last_login_for_unknown_id_is_query_error() {
        let store = InMemoryUserStore::new();
        let err = store.update_last_login(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[tokio::test]
    async fn revocation_round_trip() {
        let store = InMemoryRevocationStore::new();
        assert!(!store.is_revoked("tok").await.unwrap());

        store
            .revoke("tok", Utc::now() + Duration::hours(1))
            .await
            .unwrap();
        assert!(store.is_revoked("tok").await.unwrap());
        assert!(!store.is_revoked("other").await.unwrap());
    }

    #[tokio::test]
    async fn prune_drops_only_expired_entries() {
        let store = InMemoryRevocationStore::new();
        store
            .revoke("expired", Utc::now() - Duration::minutes(5))
            .await
            .unwrap();
        store
            .revoke("live", Utc::now() + Duration::hours(1))
            .await
            .unwrap();

        let pruned = store.prune_expired().await.unwrap();
        assert_eq!(pruned, 1);
        assert_eq!(store.len(), 1);
        assert!(store.is_revoked("live").await.unwrap());
    }
}
