//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use carebook::outbound::persistence::DbPool;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: Zeroizing<String>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Configuration backed by the in-memory store until a pool is attached.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt_secret: Zeroizing<String>) -> Self {
        Self {
            bind_addr,
            jwt_secret,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
