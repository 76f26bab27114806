//! Items API - REST server

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = match &config.database {
        Some(pg) => {
            info!("Connecting to PostgreSQL at {}", pg.redacted_url());
            let db = database::postgres::connect_from_config_with_retry(pg.clone(), None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
            Some(db)
        }
        None => None,
    };

    let state = AppState {
        config: config.clone(),
        db,
    };

    let api_routes = api::routes(&state).await?;
    let router =
        axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &state.config.server).await?;
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()));

    info!(
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        if let Some(db) = state.db {
            info!("Shutting down: closing PostgreSQL pool");
            match db.close().await {
                Ok(()) => info!("PostgreSQL pool closed"),
                Err(e) => warn!("Failed to close PostgreSQL pool: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Items API shutdown complete");
    Ok(())
}
