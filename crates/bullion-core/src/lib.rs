#![deny(missing_docs)]

//! # bullion-core — Foundational Types for the Bullion Platform
//!
//! This crate defines the domain types the rest of the workspace depends on.
//! It has no internal crate dependencies — only `serde`, `thiserror`,
//! `chrono`, `uuid`, and `utoipa` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Closed enums for every domain vocabulary.** [`Role`] and
//!    [`AccountStatus`] are exhaustive; resolution from strings fails loudly
//!    on unrecognized values instead of defaulting.
//!
//! 2. **One sanitized view.** [`AuthUser`] is the only user shape that
//!    crosses the API boundary. Its constructor enforces the data-integrity
//!    invariant (non-empty name and email) — a violating record is a hard
//!    error, never silently patched.
//!
//! 3. **[`DomainError`] hierarchy.** Structured errors with `thiserror` —
//!    no `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod error;
pub mod role;
pub mod status;
pub mod user;

// Re-export primary types at crate root for ergonomic imports.
pub use error::DomainError;
pub use role::Role;
pub use status::AccountStatus;
pub use user::{AuthUser, UserRecord};
