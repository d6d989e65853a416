//! Account domain service: registration, login and request authentication.
//!
//! Implements [`AccountCommand`] and [`Authenticator`] on top of the user
//! repository, the password hasher and the token service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    AccountCommand, Authenticator, IssuedToken, PasswordHasher, PasswordHasherError,
    TokenService, TokenServiceError, UserPersistenceError, UserRepository,
};
use crate::domain::validation::duplicate_username;
use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

const BAD_LOGIN: &str = "invalid username or password";
const BAD_BASIC_CREDENTIALS: &str = "invalid credentials";
const BAD_TOKEN: &str = "invalid or expired token";

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> AccountService<U, H, T> {
    /// Create a service over the given adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable("user store is unavailable")
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { username } => duplicate_username(&username),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    error!(%error, "password hashing failed");
    Error::internal(error.to_string())
}

fn map_signing_error(error: TokenServiceError) -> Error {
    error!(%error, "token issuance failed");
    Error::internal(error.to_string())
}

impl<U, H, T> AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn verify_credentials(
        &self,
        credentials: &LoginCredentials,
        rejection: &'static str,
    ) -> Result<User, Error> {
        let found = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?;
        let Some(user) = found else {
            debug!(username = %credentials.username(), "unknown username");
            return Err(Error::unauthorized(rejection));
        };
        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(map_hasher_error)?;
        if matches {
            Ok(user)
        } else {
            debug!(user_id = %user.id(), "password mismatch");
            Err(Error::unauthorized(rejection))
        }
    }
}

#[async_trait]
impl<U, H, T> AccountCommand for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let username = registration.username();
        let existing = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(duplicate_username(username.as_str()));
        }

        let hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_hasher_error)?;
        let user = User::new(UserId::random(), username.clone(), hash)
            .with_names(registration.firstname(), registration.lastname());
        // A concurrent registration can still win the race; the repository
        // reports it as a duplicate.
        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), "account registered");
        Ok(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error> {
        let user = self.verify_credentials(credentials, BAD_LOGIN).await?;
        let token = self.tokens.issue(&user).map_err(map_signing_error)?;
        info!(user_id = %user.id(), "login succeeded");
        Ok(token)
    }
}

#[async_trait]
impl<U, H, T> Authenticator for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn authenticate_basic(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        self.verify_credentials(credentials, BAD_BASIC_CREDENTIALS)
            .await
    }

    async fn authenticate_bearer(&self, token: &str) -> Result<User, Error> {
        let user_id = self.tokens.verify(token).map_err(|error| {
            debug!(%error, "bearer token rejected");
            Error::unauthorized(BAD_TOKEN)
        })?;
        let found = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?;
        found.ok_or_else(|| {
            debug!(%user_id, "token subject no longer exists");
            Error::unauthorized(BAD_TOKEN)
        })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
