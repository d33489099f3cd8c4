//! HTTP server configuration object.

use std::net::SocketAddr;

use backend::outbound::persistence::DbPool;
use chrono::Duration;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: Vec<u8>,
    pub(crate) token_ttl: Duration,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Construct a server configuration.
    ///
    /// The token lifetime defaults to one hour.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt_secret: Vec<u8>, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            jwt_secret,
            token_ttl: Duration::hours(1),
            db_pool,
        }
    }

    /// Override the issued-token lifetime.
    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
