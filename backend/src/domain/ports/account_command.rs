//! Driving ports for account use-cases: registration, login and request
//! authentication.
//!
//! Inbound adapters depend on these traits rather than on the concrete
//! service so handler wiring stays independent of storage and crypto.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User};

use super::IssuedToken;

/// Account lifecycle use-cases.
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create a new account.
    ///
    /// Fails with a conflict when the username is already registered.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Exchange valid credentials for a bearer token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error>;
}

/// Resolves the acting user for protected endpoints.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify a username and password sent with HTTP Basic auth.
    async fn authenticate_basic(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Verify a bearer token minted by [`AccountCommand::login`].
    async fn authenticate_bearer(&self, token: &str) -> Result<User, Error>;
}
