//! Napchart entry-point: resolves settings, prepares persistence, and serves
//! the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use napchart::inbound::http::health::HealthState;
use napchart::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

fn io_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
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

    let settings = AppSettings::load_from_iter(std::env::args_os()).map_err(io_error)?;
    let key = settings.session_key().map_err(io_error)?;
    let bind_addr = settings.bind_addr().map_err(io_error)?;

    let mut config = ServerConfig::new(key, settings.cookie_secure(), bind_addr);

    match settings.database_url.clone() {
        Some(url) => {
            if settings.run_migrations() {
                run_pending_migrations(url.clone()).await.map_err(io_error)?;
            }
            let pool = DbPool::new(PoolConfig::new(url)).await.map_err(io_error)?;
            config = config.with_db_pool(pool);
        }
        None => warn!("NAPCHART_DATABASE_URL not set; naps will not be persisted"),
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(server::build_metrics()?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "napchart listening");
    server.await
}
