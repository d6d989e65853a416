//! Driven port for bearer token issuance and verification.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token services.
    pub enum TokenServiceError {
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is malformed, tampered with, or expired.
        Rejected { message: String } => "token rejected: {message}",
    }
}

/// Bearer token handed to a client after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct IssuedToken {
    /// Opaque token value for the `Authorization: Bearer` header.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Seconds until the token expires.
    pub expires_in: u64,
}

impl IssuedToken {
    /// Wrap a freshly signed bearer token.
    pub fn bearer(token: impl Into<String>, expires_in: u64) -> Self {
        Self {
            token: token.into(),
            token_type: "Bearer",
            expires_in,
        }
    }
}

/// Mints and checks stateless bearer tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token identifying `user`.
    fn issue(&self, user: &User) -> Result<IssuedToken, TokenServiceError>;

    /// Validate `token` and return the user it was issued to.
    fn verify(&self, token: &str) -> Result<UserId, TokenServiceError>;
}
