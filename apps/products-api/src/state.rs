//! Application state management

use axum_helpers::ApiKeyAuth;
use domain_products::InMemoryProductRepository;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth: ApiKeyAuth,
    /// Process-wide product store; clones share the same collection
    pub products: InMemoryProductRepository,
}

impl AppState {
    pub fn new(config: Config) -> eyre::Result<Self> {
        let auth = ApiKeyAuth::from_config(&config.api_key)?;

        Ok(Self {
            config,
            auth,
            products: InMemoryProductRepository::seeded(),
        })
    }
}
