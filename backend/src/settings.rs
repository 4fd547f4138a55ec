//! Application settings loaded via OrthoConfig.
//!
//! Values come from command-line flags and `EXERCISE_TRACKER_*` environment
//! variables, e.g. `EXERCISE_TRACKER_PORT=8080`.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_VIEWS_DIR: &str = "views";

fn default_host() -> String {
    DEFAULT_HOST.to_owned()
}

/// Configuration for the HTTP listener, persistence and static assets.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXERCISE_TRACKER")]
pub struct AppSettings {
    /// PostgreSQL connection string. Data is kept in memory when absent.
    pub database_url: Option<String>,
    /// Interface to listen on.
    #[ortho_config(default = default_host())]
    pub host: String,
    /// Port to listen on.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_DB_MAX_CONNECTIONS)]
    pub db_max_connections: u32,
    /// Directory served as static assets.
    #[ortho_config(default = PathBuf::from(DEFAULT_PUBLIC_DIR))]
    pub public_dir: PathBuf,
    /// Directory holding the landing page.
    #[ortho_config(default = PathBuf::from(DEFAULT_VIEWS_DIR))]
    pub views_dir: PathBuf,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db_max_connections", &self.db_max_connections)
            .field("public_dir", &self.public_dir)
            .field("views_dir", &self.views_dir)
            .finish()
    }
}

impl AppSettings {
    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Interface the listener binds to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port the listener binds to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Upper bound on pooled database connections.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    /// Return the public asset directory.
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Return the landing page directory.
    pub fn views_dir(&self) -> &Path {
        &self.views_dir
    }

    /// Resolve the listener address from the host and port.
    ///
    /// # Errors
    /// Returns [`io::Error`] when the host does not resolve.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no address found for host {}", self.host()),
                )
            })
    }
}
