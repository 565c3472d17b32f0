pub mod config;
pub mod error;
pub mod model;
pub mod web;

use config::Config;
use model::ModelManager;

// Shared, read-only state handed to every handler
pub struct AppState {
    pub config: Config,
    pub model: ModelManager,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let model = ModelManager::new(&config.provider)?;
        Ok(Self { config, model })
    }
}
