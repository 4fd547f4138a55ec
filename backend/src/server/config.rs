//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use exercise_tracker::inbound::http::pages::StaticAssets;
use exercise_tracker::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) assets: StaticAssets,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration that keeps data in memory.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, assets: StaticAssets) -> Self {
        Self {
            bind_addr,
            assets,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    ///
    /// Without a pool the server stores users and exercises in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Whether a database pool has been attached.
    #[must_use]
    pub fn has_db_pool(&self) -> bool {
        self.db_pool.is_some()
    }
}
