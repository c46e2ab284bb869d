//! # Auth Configuration
//!
//! Explicit configuration struct injected at service construction. There is
//! no process-global fallback: a missing signing secret or expiry duration
//! fails construction, which the binary treats as startup-fatal. The secret
//! and expiry are immutable for the service's lifetime — key rotation means
//! building a new service, not mutating this one.

use std::time::Duration;

use thiserror::Error;

/// Configuration construction failures. All of these abort startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The signing secret was absent or empty.
    #[error("signing secret must be non-empty")]
    MissingSecret,

    /// The token expiry was absent or empty.
    #[error("token expiry must be non-empty")]
    MissingExpiry,

    /// The token expiry did not parse as a duration, or was zero.
    #[error("invalid token expiry {value:?}: {reason}")]
    InvalidExpiry {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// HMAC signing secret for bearer tokens.
///
/// Custom `Debug` redacts the value so configuration can be logged without
/// leaking key material.
#[derive(Clone)]
pub struct SigningSecret(String);

impl SigningSecret {
    /// Raw key bytes for the token codec.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningSecret").field(&"[REDACTED]").finish()
    }
}

/// Immutable auth-service configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    secret: SigningSecret,
    token_ttl: Duration,
    store_timeout: Duration,
}

/// Default upper bound on any single store call.
const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

impl AuthConfig {
    /// Validate and build the configuration.
    ///
    /// `expiry` uses humantime syntax ("24h", "15m", "1s"). Empty secret,
    /// empty expiry, unparseable expiry, and zero expiry are all rejected.
    pub fn new(secret: impl Into<String>, expiry: &str) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        let expiry = expiry.trim();
        if expiry.is_empty() {
            return Err(ConfigError::MissingExpiry);
        }
        let token_ttl =
            humantime::parse_duration(expiry).map_err(|e| ConfigError::InvalidExpiry {
                value: expiry.to_string(),
                reason: e.to_string(),
            })?;
        if token_ttl.is_zero() {
            return Err(ConfigError::InvalidExpiry {
                value: expiry.to_string(),
                reason: "expiry must be positive".to_string(),
            });
        }

        Ok(Self {
            secret: SigningSecret(secret),
            token_ttl,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        })
    }

    /// Override the per-call store timeout.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// The token signing secret.
    pub fn secret(&self) -> &SigningSecret {
        &self.secret
    }

    /// Lifetime of issued tokens.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Upper bound on any single store call before it maps to an internal
    /// error instead of hanging the request.
    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config() {
        let config = AuthConfig::new("test-secret", "24h").unwrap();
        assert_eq!(config.token_ttl(), Duration::from_secs(24 * 3600));
        assert_eq!(config.store_timeout(), DEFAULT_STORE_TIMEOUT);
    }

    #[test]
    fn empty_secret_rejected() {
        assert_eq!(
            AuthConfig::new("", "24h").unwrap_err(),
            ConfigError::MissingSecret
        );
        assert_eq!(
            AuthConfig::new("   ", "24h").unwrap_err(),
            ConfigError::MissingSecret
        );
    }

    #[test]
    fn empty_expiry_rejected() {
        assert_eq!(
            AuthConfig::new("secret", "").unwrap_err(),
            ConfigError::MissingExpiry
        );
    }

    #[test]
    fn garbage_expiry_rejected() {
        assert!(matches!(
            AuthConfig::new("secret", "soon"),
            Err(ConfigError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn zero_expiry_rejected() {
        assert!(matches!(
            AuthConfig::new("secret", "0s"),
            Err(ConfigError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let config = AuthConfig::new("super-secret-key", "1h").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("REDACTED"));
    }
}
