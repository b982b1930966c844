//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use carebook::inbound::http::health::HealthState;
use carebook::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use carebook::settings::{AppSettings, BuildMode};

use server::{ServerConfig, create_server};

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

    let settings = AppSettings::from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| {
            error!(error = %err, "invalid configuration");
            std::io::Error::other(err)
        })?;
    info!(?settings, "configuration loaded");

    let AppSettings {
        jwt_secret,
        bind_addr,
        database_url,
        db_pool_max_size,
    } = settings;
    let mut config = ServerConfig::new(bind_addr, jwt_secret);

    if let Some(url) = database_url {
        run_pending_migrations(&url).await.map_err(|err| {
            error!(error = %err, "database migrations failed");
            std::io::Error::other(err)
        })?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(db_pool_max_size))
            .await
            .map_err(|err| {
                error!(error = %err, "database pool could not be built");
                std::io::Error::other(err)
            })?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
