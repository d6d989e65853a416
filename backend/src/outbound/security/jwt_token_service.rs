//! HS256 JWT implementation of the [`TokenService`] port.
//!
//! Tokens are stateless: the subject is the user id and validity is bounded
//! only by `exp`. There is no revocation list.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{IssuedToken, TokenService, TokenServiceError};
use crate::domain::{User, UserId};

/// Claims carried by issued tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id.
    pub sub: String,
    /// Username at issue time, informational only.
    pub username: String,
    /// Issued at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenService {
    /// Create a service signing with `secret`; tokens live for `ttl`.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            ttl,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<IssuedToken, TokenServiceError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenServiceError::signing("token expiry is out of range"))?;
        let claims = TokenClaims {
            sub: user.id().to_string(),
            username: user.username().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| TokenServiceError::signing(err.to_string()))?;
        let expires_in = u64::try_from(self.ttl.num_seconds()).unwrap_or(0);
        Ok(IssuedToken::bearer(token, expires_in))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenServiceError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| TokenServiceError::rejected(err.to_string()))?;
        UserId::new(&data.claims.sub).map_err(|err| TokenServiceError::rejected(err.to_string()))
    }
}
