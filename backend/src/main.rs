//! Exercise tracker entry-point: loads settings, prepares persistence and
//! starts the HTTP server.

mod server;
mod settings;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use exercise_tracker::inbound::http::health::HealthState;
use exercise_tracker::inbound::http::pages::StaticAssets;
use exercise_tracker::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, create_server};
use settings::AppSettings;

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

    let settings = AppSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let assets = StaticAssets::new(settings.views_dir(), settings.public_dir());
    let mut config = ServerConfig::new(settings.bind_addr()?, assets);

    match settings.database_url() {
        Some(database_url) => {
            run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(
                PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
            )
            .await
            .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => warn!("EXERCISE_TRACKER_DATABASE_URL not set; data will not survive a restart"),
    }
    info!(
        persistence = if config.has_db_pool() { "postgres" } else { "memory" },
        "starting exercise tracker"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
