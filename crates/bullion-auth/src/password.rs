//! # Password Hashing
//!
//! Argon2id hashing and verification over PHC-format strings. Verification
//! is CPU-bound, so the async entry point runs it on the blocking pool —
//! a login burst must not stall the request dispatcher.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

/// Password hashing/verification failures.
///
/// A mismatched password is NOT an error — `verify` returns `Ok(false)`.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Salt generation or hashing failed.
    #[error("failed to hash password: {0}")]
    Hash(String),

    /// The stored hash is not a parseable PHC string. This is stored-data
    /// corruption, not a caller mistake.
    #[error("stored password hash is not a valid PHC string: {0}")]
    InvalidHash(String),

    /// The blocking verification task was cancelled or panicked.
    #[error("password verification task failed: {0}")]
    Task(String),
}

/// Hash a password into a PHC-format Argon2id string with a fresh salt.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError::Hash(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hash(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verify a password against a stored PHC string. Synchronous and CPU-bound.
pub fn verify(stored_hash: &str, password: &str) -> Result<bool, PasswordError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::InvalidHash(e.to_string())),
    }
}

/// Verify on the blocking pool so concurrent requests keep flowing.
pub async fn verify_blocking(
    stored_hash: String,
    password: String,
) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify(&stored_hash, &password))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
}
