//! Session token minting and verification.
//!
//! Tokens are HS256 JWTs carrying a minimal identity claim set. The
//! signing secret is loaded once at startup; verification fails closed
//! on any signature mismatch, structural malformation, or expiry. The
//! three failure kinds stay distinguishable here for diagnostics even
//! though they collapse to one generic 401 at the HTTP layer.
//!
//! There is no revocation list: a minted token remains valid for its
//! full TTL even after logout.

use anyhow::{ensure, Result};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::PublicUser;

/// Identity and timing fields embedded in a session token.
/// Immutable once minted; `exp == iat + TTL`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is structurally malformed")]
    Malformed,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token is expired")]
    Expired,
}

/// Mints and verifies signed session tokens with a fixed TTL.
pub struct SessionTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl SessionTokenCodec {
    /// Build a codec from the process-wide signing secret.
    ///
    /// # Errors
    /// Refuses an empty secret; the caller treats this as fatal at startup.
    pub fn new(secret: &SecretString, ttl_seconds: i64) -> Result<Self> {
        let secret = secret.expose_secret();
        ensure!(!secret.trim().is_empty(), "signing secret must not be empty");
        ensure!(ttl_seconds > 0, "session TTL must be positive");

        let mut validation = Validation::new(Algorithm::HS256);
        // "valid while now < expiresAt", no grace period.
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        })
    }

    /// Sign a claim set for the given user, expiring exactly TTL from now.
    ///
    /// # Errors
    /// Returns an error if serialization or signing fails.
    pub fn mint(&self, user: &PublicUser) -> Result<String> {
        let issued_at = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            iat: issued_at,
            exp: issued_at + self.ttl_seconds,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(Into::into)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// [`TokenError::Expired`] once the expiry second is reached,
    /// [`TokenError::BadSignature`] when the signature does not match the
    /// payload (any single-bit payload change lands here), and
    /// [`TokenError::Malformed`] for everything that does not parse.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let claims = decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })?;

        // The library still accepts a token in the second `exp` falls on;
        // the session bound is strict, valid only while `now < exp`.
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }
}
