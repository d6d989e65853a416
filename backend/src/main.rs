//! Shopping list service entry-point: loads settings, prepares storage and
//! serves the REST API.

use std::io;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use shoplist::inbound::http::health::HealthState;
use shoplist::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use shoplist::server::{ServerConfig, ServerSettings, create_server};

async fn connect_database(database_url: &str) -> io::Result<DbPool> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&url))
        .await
        .map_err(io::Error::other)?
        .map_err(io::Error::other)?;
    info!(applied, "database migrations complete");
    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(io::Error::other)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from(std::env::args_os()).map_err(io::Error::other)?;
    let secret = settings
        .token_secret(cfg!(debug_assertions))
        .map_err(io::Error::other)?;
    let ttl = settings.token_ttl().map_err(io::Error::other)?;

    let mut config = ServerConfig::new(settings.host(), settings.port(), secret, ttl);
    match settings.database_url() {
        Some(url) => config = config.with_db_pool(connect_database(url).await?),
        None => warn!("SHOPLIST_DATABASE_URL not set; data is kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
