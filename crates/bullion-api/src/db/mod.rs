//! # Postgres Store Implementations
//!
//! Parameterized-SQL implementations of the auth core's two store
//! contracts. The `users` table belongs to the platform's user service —
//! this crate only reads it (plus the one `last_login` write the auth core
//! owns). The `revoked_tokens` table is the auth core's own data, so its
//! schema is bootstrapped here.
//!
//! The pool is optional: without `DATABASE_URL` the binary falls back to
//! in-memory stores for development.

pub mod revocations;
pub mod users;

pub use revocations::PgRevocationStore;
pub use users::PgUserStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Initialize a connection pool from `DATABASE_URL`, if set.
///
/// Absent variable means no database — the caller decides on a fallback.
/// A set-but-unreachable database is a hard error: a half-configured
/// deployment must not silently run in-memory.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await?;
    Ok(Some(pool))
}

/// Create the auth-owned tables if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS revoked_tokens (
             token_hash TEXT PRIMARY KEY,
             expires_at TIMESTAMPTZ NOT NULL,
             revoked_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
         )",
    )
    .execute(pool)
    .await?;
    Ok(())
}
