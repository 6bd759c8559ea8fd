pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod services;

use std::sync::Arc;

pub use error::{ConfigError, LayoutError};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        Arc::new(Self { config })
    }
}
