//! Service entry-point: loads configuration, wires the book store, bearer
//! token verification and OpenAPI docs, then runs the HTTP server.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use book_catalog::inbound::http::health::HealthState;
use book_catalog::outbound::auth::build_verifier;
use book_catalog::outbound::persistence::{DbPool, PoolConfig};
use book_catalog::settings::AppSettings;

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

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let verifier = build_verifier(&settings.jwt_settings())
        .map_err(|e| std::io::Error::other(format!("token verification setup failed: {e}")))?;

    let mut config = ServerConfig::new(bind_addr, Arc::new(verifier));
    #[cfg(debug_assertions)]
    {
        config = config.with_issuer(settings.jwt_issuer().map(str::to_owned));
    }

    if let Some(database_url) = settings.database_url() {
        let pool_config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size);
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database URL configured; books are kept in memory");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config).await?;
    info!(%bind_addr, "book catalog listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
