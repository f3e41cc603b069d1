pub mod config;
pub mod db;
pub mod error;
pub mod live;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod utils;
pub mod validation;

use crate::config::Config;
use crate::db::DbPool;
use crate::live::LivePublisher;
use crate::middleware::auth::TokenVerifier;
use std::sync::Arc;
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub live: LivePublisher,
    pub config: Arc<Config>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(db: DbPool, live: LivePublisher, config: Config) -> Self {
        let verifier = TokenVerifier::new(&config.auth());
        Self {
            db,
            live,
            config: Arc::new(config),
            verifier: Arc::new(verifier),
        }
    }
}

pub fn init_tracing(config: &Config) {
    let level = match config.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_max_level(level).init();
        }
    }
}
