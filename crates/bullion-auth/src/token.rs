//! # Token Issuance & Verification
//!
//! HS256-signed bearer tokens via `jsonwebtoken`. Claims are the closed set
//! `{id, email, role, iat, exp}` — the role is the [`Role`] enum, so a token
//! carrying an unrecognized role string fails signature-layer decoding
//! outright instead of being coerced.
//!
//! The codec validates with **zero leeway**: a token is expired the second
//! its `exp` passes, and the session envelope reports exactly the timestamps
//! validation will later compute (the envelope is filled by decoding the
//! just-minted token, not by re-deriving them).

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use bullion_core::{AuthUser, Role};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::session::Session;

/// Claims carried inside every access token. Immutable once signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject user ID.
    pub id: Uuid,
    /// Subject email at issuance.
    pub email: String,
    /// Role frozen at issuance. A later role change does not invalidate
    /// outstanding tokens; only logout does.
    pub role: Role,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Signature-layer failures, before any policy interpretation.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Signature verified but `exp` has passed.
    #[error("token has expired")]
    Expired,

    /// Structurally bad token: malformed, bad signature, wrong algorithm,
    /// or claims that don't deserialize (including unknown roles).
    #[error("malformed or tampered token: {0}")]
    Malformed(String),

    /// Anything else — key trouble, crypto backend failure. The cause is
    /// preserved for server-side logs.
    #[error("token processing failed: {0}")]
    Other(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Malformed(_) => AuthError::TokenInvalid,
            TokenError::Other(msg) => AuthError::Internal(msg),
        }
    }
}

/// Mints and verifies signed bearer tokens.
///
/// Keys and lifetime come from [`AuthConfig`] at construction and never
/// change; secret rotation means constructing a new codec.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec from validated configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Exact expiry; the default 60s grace would let "expired" tokens pass.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(config.secret().as_bytes()),
            decoding: DecodingKey::from_secret(config.secret().as_bytes()),
            ttl_secs: config.token_ttl().as_secs() as i64,
            validation,
        }
    }

    /// Sign a fresh token for the given user.
    pub fn mint(&self, user: &AuthUser) -> Result<String, TokenError> {
        let iat = Utc::now().timestamp();
        let claims = TokenClaims {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            iat,
            exp: iat + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Other(e.to_string()))
    }

    /// Verify signature and expiry, returning the decoded claims.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        match decode::<TokenClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidToken
                | ErrorKind::InvalidSignature
                | ErrorKind::ImmatureSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName
                | ErrorKind::MissingRequiredClaim(_)
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => TokenError::Malformed(e.to_string()),
                _ => TokenError::Other(e.to_string()),
            }),
        }
    }

    /// Mint a token and wrap it in a session envelope.
    ///
    /// The envelope's `issued_at`/`expires_at`/`expires_in` come from
    /// decoding the token that was just minted, so the reported values are
    /// guaranteed to match what validation computes later.
    pub fn issue(&self, user: &AuthUser) -> Result<Session, TokenError> {
        let access_token = self.mint(user)?;
        let claims = self.decode(&access_token)?;

        let issued_at = timestamp(claims.iat)?;
        let expires_at = timestamp(claims.exp)?;

        Ok(Session {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: claims.exp - claims.iat,
            expires_at,
            issued_at,
            user: user.clone(),
        })
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| TokenError::Other(format!("claim timestamp out of range: {secs}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn codec(secret: &str, expiry: &str) -> TokenCodec {
        TokenCodec::new(&AuthConfig::new(secret, expiry).unwrap())
    }

    fn user(role: Role) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "grace@bullion.test".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            role,
        }
    }

    #[test]
    fn round_trip_preserves_claims() {
        let codec = codec("s3cret", "1h");
        let user = user(Role::Advisor);

        let token = codec.mint(&user).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.id, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, Role::Advisor);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn envelope_matches_decoded_claims() {
        let codec = codec("s3cret", "30m");
        let session = codec.issue(&user(Role::Customer)).unwrap();

        let claims = codec.decode(&session.access_token).unwrap();
        assert_eq!(session.issued_at.timestamp(), claims.iat);
        assert_eq!(session.expires_at.timestamp(), claims.exp);
        assert_eq!(session.expires_in, 30 * 60);
        assert_eq!(session.token_type, "Bearer");
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let minting = codec("secret-a", "1h");
        let verifying = codec("secret-b", "1h");

        let token = minting.mint(&user(Role::User)).unwrap();
        assert!(matches!(
            verifying.decode(&token),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn garbage_token_is_malformed() {
        let codec = codec("s3cret", "1h");
        assert!(matches!(
            codec.decode("not.a.token"),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(codec.decode(""), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn tampered_payload_is_malformed() {
        let codec = codec("s3cret", "1h");
        let token = codec.mint(&user(Role::User)).unwrap();

        // Flip a character in the payload segment.
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        assert!(matches!(
            codec.decode(&tampered),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn one_second_ttl_expires() {
        let codec = codec("s3cret", "1s");
        let token = codec.mint(&user(Role::Investor)).unwrap();

        // Valid right away...
        assert!(codec.decode(&token).is_ok());

        // ...and expired once the second has fully passed (leeway is zero).
        std::thread::sleep(std::time::Duration::from_millis(2100));
        assert!(matches!(codec.decode(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn expired_maps_to_token_expired_code() {
        let err: AuthError = TokenError::Expired.into();
        assert_eq!(err, AuthError::TokenExpired);
        let err: AuthError = TokenError::Malformed("x".into()).into();
        assert_eq!(err, AuthError::TokenInvalid);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn round_trip_for_arbitrary_subjects(
            local in "[a-z0-9]{1,12}",
            domain in "[a-z]{1,8}",
            role_idx in 0usize..Role::ALL.len(),
        ) {
            let codec = codec("prop-secret", "2h");
            let user = AuthUser {
                id: Uuid::new_v4(),
                email: format!("{local}@{domain}.test"),
                first_name: "P".to_string(),
                last_name: "T".to_string(),
                role: Role::ALL[role_idx],
            };

            let token = codec.mint(&user).unwrap();
            let claims = codec.decode(&token).unwrap();
            prop_assert_eq!(claims.id, user.id);
            prop_assert_eq!(claims.email, user.email);
            prop_assert_eq!(claims.role, user.role);
        }
    }
}
