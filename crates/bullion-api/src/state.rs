//! # Application State
//!
//! Shared state for the Axum application: the auth service handle and the
//! configured authentication schemes. Everything is behind `Arc`, so the
//! state clones cheaply into every handler.

use std::sync::Arc;

use bullion_auth::AuthService;

use crate::gate::{AuthScheme, BearerScheme};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// The session lifecycle service.
    pub auth: Arc<AuthService>,
    /// Authentication schemes the gate evaluates, in submission order.
    pub schemes: Arc<Vec<Box<dyn AuthScheme>>>,
}

impl AppState {
    /// Build state with the default scheme set (bearer only).
    pub fn new(auth: AuthService) -> Self {
        Self {
            auth: Arc::new(auth),
            schemes: Arc::new(vec![Box::new(BearerScheme)]),
        }
    }

    /// Replace the scheme set. Order matters: the gate commits the earliest
    /// success by this order and surfaces the last entry's failure.
    pub fn with_schemes(mut self, schemes: Vec<Box<dyn AuthScheme>>) -> Self {
        self.schemes = Arc::new(schemes);
        self
    }
}
