//! # bullion-auth — Authentication & Session Lifecycle Core
//!
//! The one stateful-looking subsystem of the Bullion platform that actually
//! isn't: sessions are self-contained signed tokens, and the only shared
//! mutable resource is the revocation list. This crate provides:
//!
//! - **Credential verification** — email/password against a stored Argon2
//!   hash plus the account-status gate ([`verifier`]).
//! - **Token issuance and validation** — HS256-signed bearer tokens carrying
//!   identity + role claims ([`token`]).
//! - **Session orchestration** — login, validate, refresh, current-user, and
//!   logout as typed-result operations ([`service`]).
//! - **Store contracts** — the narrow user-store and revocation-store
//!   interfaces the platform's relational layer implements, with in-memory
//!   implementations for development and tests ([`store`]).
//!
//! ## Validity Invariant
//!
//! A token is valid iff it verifies cryptographically, is unexpired, is
//! absent from the revocation store, and (where an operation touches the
//! user) the user is currently active. Checks run in exactly that order;
//! a revocation-store failure fails closed.
//!
//! ## Configuration
//!
//! [`AuthConfig`] is built once at startup and is immutable for the
//! service's lifetime. Missing or empty secret/expiry is a construction
//! error, not a silent default — rotation means rebuilding the service.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod session;
pub mod store;
pub mod token;
pub mod verifier;

// Re-export primary types at crate root for ergonomic imports.
pub use config::{AuthConfig, ConfigError, SigningSecret};
pub use error::AuthError;
pub use service::AuthService;
pub use session::{LogoutReceipt, Session};
pub use store::{
    token_fingerprint, InMemoryRevocationStore, InMemoryUserStore, RevocationStore, StoreError,
    UserStore,
};
pub use token::{TokenClaims, TokenCodec};
pub use verifier::CredentialVerifier;
