//! Backend entry-point: configuration from the environment, structured
//! logging, pool construction, and server start-up.

mod server;

use std::env;
use std::net::SocketAddr;

use chrono::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

fn env_config() -> std::io::Result<(SocketAddr, String, Vec<u8>, Duration)> {
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;

    let jwt_secret = env::var("JWT_SECRET")
        .map_err(|_| std::io::Error::other("JWT_SECRET must be set"))?
        .into_bytes();

    let token_ttl = match env::var("TOKEN_TTL_SECS") {
        Ok(raw) => Duration::seconds(raw.parse().map_err(|e| {
            std::io::Error::other(format!("invalid TOKEN_TTL_SECS: {e}"))
        })?),
        Err(_) => Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
    };

    Ok((bind_addr, database_url, jwt_secret, token_ttl))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let (bind_addr, database_url, jwt_secret, token_ttl) = env_config()?;

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build database pool: {e}")))?;

    let config = ServerConfig::new(bind_addr, jwt_secret, pool).with_token_ttl(token_ttl);
    info!(addr = %config.bind_addr(), "starting server");
    server::create_server(config)?.await
}
