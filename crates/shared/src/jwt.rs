//! Bearer token verification for the external identity provider.
//!
//! The identity provider signs access tokens with HS256 using a shared
//! secret; this backend only ever verifies. Role and tenant resolution
//! happen afterwards against the `users` table; the token carries nothing
//! but the subject.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default leeway in seconds for clock skew tolerance.
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Error type for token verification.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Claims carried by identity provider access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Verifier for identity provider bearer tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    leeway_secs: u64,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("decoding_key", &"[REDACTED]")
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a verifier from the shared HS256 secret.
    pub fn new(secret: &str) -> Self {
        Self::with_leeway(secret, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a verifier with custom clock-skew leeway.
    pub fn with_leeway(secret: &str, leeway_secs: u64) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway_secs,
        }
    }

    /// Verifies a bearer token and returns the subject user id.
    pub fn verify(&self, token: &str) -> Result<Uuid, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| JwtError::InvalidToken("subject is not a UUID".to_string()))
    }
}

/// Encodes a token for tests and local development tooling.
///
/// Production tokens are minted by the identity provider, never here.
pub fn encode_for_testing(secret: &str, user_id: Uuid, ttl_secs: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + ttl_secs,
        iat: now,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("HS256 encoding cannot fail with a valid secret")
}
