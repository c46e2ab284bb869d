//! Revocation-store contract over the auth-owned `revoked_tokens` table.
//!
//! Tokens are keyed by SHA-256 fingerprint. Inserts and lookups are single
//! statements, so revocation is atomic per token without explicit locking.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bullion_auth::{token_fingerprint, RevocationStore, StoreError};

/// Postgres-backed revocation list.
#[derive(Clone)]
pub struct PgRevocationStore {
    pool: PgPool,
}

impl PgRevocationStore {
    /// Wrap a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevocationStore for PgRevocationStore {
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO revoked_tokens (token_hash, expires_at)
             VALUES ($1, $2)
             ON CONFLICT (token_hash) DO NOTHING",
        )
        .bind(token_fingerprint(token))
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token_hash = $1)",
        )
        .bind(token_fingerprint(token))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))
    }

    async fn prune_expired(&self) -> Result<usize, StoreError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(result.rows_affected() as usize)
    }
}
