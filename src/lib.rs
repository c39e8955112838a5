//! LocalLibrary catalog core
//!
//! Books, authors, genres, prices and lendable copies, with the loan
//! lifecycle, renewal workflow and listing queries that a presentation layer
//! calls into.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared with the presentation layer
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, &config.loans);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
