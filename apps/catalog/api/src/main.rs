use std::str::FromStr;

use axum_helpers::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use observability::{LogLevel, Logger};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    // The one process-wide structured logger; every consumer gets a clone
    let logger = Logger::to_stdout(
        LogLevel::from_str(&config.logging.min_level)
            .map_err(|_| eyre::eyre!("Invalid LOG_MIN_LEVEL '{}'", config.logging.min_level))?,
    );

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, "catalog-api")
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    let state = AppState { config, db, logger };

    // Build router with API routes (domain routers carry their own state)
    let api_routes = api::routes(&state);

    // create_router adds docs and the inner middleware stack
    let router = create_router::<openapi::ApiDoc>(api_routes);

    // Request logging wraps every route; the panic translator is outermost
    // so nothing escapes it
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()))
        .layer(axum::middleware::from_fn_with_state(
            state.logger.clone(),
            observability::request_logging,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.logger.clone(),
            observability::translate_panics,
        ));

    info!("Starting catalog API");

    create_app(app, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
