//! Server settings loaded via OrthoConfig and the runtime configuration
//! derived from them.

use std::ffi::OsString;

use chrono::Duration;
use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

use crate::outbound::persistence::DbPool;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;
const EPHEMERAL_SECRET_LEN: usize = 32;

/// Errors raised while turning settings into a runnable configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Settings could not be read from the environment or arguments.
    #[error("failed to load settings: {message}")]
    Load { message: String },
    /// No signing secret was configured and ephemeral secrets are disabled.
    #[error("SHOPLIST_TOKEN_SECRET must be set (or SHOPLIST_ALLOW_EPHEMERAL_SECRET=true)")]
    MissingTokenSecret,
    /// The token lifetime is not a positive number of minutes.
    #[error("token lifetime must be a positive number of minutes, got {minutes}")]
    InvalidTokenTtl { minutes: i64 },
}

/// Configuration values controlling the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHOPLIST")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL; in-memory storage is used when absent.
    pub database_url: Option<String>,
    /// Secret used to sign bearer tokens.
    pub token_secret: Option<String>,
    /// Bearer token lifetime in minutes.
    pub token_ttl_minutes: Option<i64>,
    /// Allow a random per-process secret when none is configured.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
}

impl ServerSettings {
    /// Load settings from the environment and `args`.
    ///
    /// # Errors
    /// Returns [`SettingsError::Load`] when a value cannot be parsed.
    pub fn load_from<I>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args).map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    /// Interface to bind, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port to bind, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Bearer token lifetime.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidTokenTtl`] for zero or negative values
    /// and for lifetimes longer than a year.
    pub fn token_ttl(&self) -> Result<Duration, SettingsError> {
        let minutes = self.token_ttl_minutes.unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&minutes) {
            return Err(SettingsError::InvalidTokenTtl { minutes });
        }
        Ok(Duration::minutes(minutes))
    }

    /// Resolve the token signing secret.
    ///
    /// Without a configured secret a random one is generated when
    /// `allow_ephemeral` (debug builds) or `allow_ephemeral_secret` is set;
    /// tokens then stop verifying after a restart.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingTokenSecret`] otherwise.
    pub fn token_secret(&self, allow_ephemeral: bool) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        let configured = self
            .token_secret
            .as_deref()
            .filter(|secret| !secret.trim().is_empty());
        if let Some(secret) = configured {
            return Ok(Zeroizing::new(secret.as_bytes().to_vec()));
        }
        if !(allow_ephemeral || self.allow_ephemeral_secret) {
            return Err(SettingsError::MissingTokenSecret);
        }
        warn!("using an ephemeral token secret (dev only)");
        let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
        rand::thread_rng().fill_bytes(secret.as_mut_slice());
        Ok(secret)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) token_secret: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: Duration,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        port: u16,
        token_secret: Zeroizing<Vec<u8>>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            token_secret,
            token_ttl,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    ///
    /// Without one the server keeps all state in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
