//! Products API - REST server over an in-memory catalogue

use axum_helpers::{create_app, create_cors_layer};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

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

    let state = AppState::new(config)?;

    let cors = if state.config.server.cors_allowed_origins.is_empty() {
        None
    } else {
        Some(create_cors_layer(
            &state.config.server.cors_allowed_origins,
            state.auth.header(),
        )?)
    };

    let router = api::app(&state, cors);

    info!(
        "Starting {} v{} ({:?}) on port {}",
        state.config.app.name,
        state.config.app.version,
        state.config.environment,
        state.config.server.port
    );

    create_app(router, &state.config.server, async move {
        info!("Shutting down: in-memory product store will be dropped");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
