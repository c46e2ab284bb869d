//! User-store contract over the platform's `users` table.
//!
//! Read-mostly: lookup by email plus the single `last_login` write the auth
//! core owns. Role and status are stored as text; rows that do not resolve
//! through the closed domain enums are corrupt records, never coerced.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use bullion_auth::{StoreError, UserStore};
use bullion_core::{AccountStatus, Role, UserRecord};

/// Postgres-backed user store.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Wrap a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape, before domain-enum resolution.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    role: String,
    status: String,
    last_login: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_record(self) -> Result<UserRecord, StoreError> {
        let role = Role::from_str(&self.role)
            .map_err(|e| StoreError::Corrupt(format!("user {}: {e}", self.id)))?;
        let status = AccountStatus::from_str(&self.status)
            .map_err(|e| StoreError::Corrupt(format!("user {}: {e}", self.id)))?;

        Ok(UserRecord {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
            status,
            last_login: self.last_login,
        })
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, first_name, last_name, role, status, last_login
             FROM users
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        row.map(UserRow::into_record).transpose()
    }

    async fn update_last_login(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }
}
