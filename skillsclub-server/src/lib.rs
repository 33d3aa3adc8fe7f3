//! skillsclub-server: read-only HTTP API for the skills catalog
//!
//! Lists repos and skills from PostgreSQL, fetches single records by id,
//! and proxies raw file content from GitHub with markdown frontmatter
//! splitting.

pub mod config;
pub mod db;
pub mod error;
pub mod files;
pub mod frontmatter;
pub mod github;
pub mod http;
pub mod models;
pub mod state;

use std::sync::Arc;

pub use config::CatalogConfig;
pub use error::{ApiError, ErrorCode};
pub use http::{build_router, run_server, ServerConfig, ServerError, DEFAULT_CORS_ORIGINS};
pub use state::AppState;

use db::Database;
use github::GitHubRawClient;

/// Startup failures while wiring the application state
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("invalid database configuration: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Build the shared state: lazily connected pool plus the GitHub client.
pub fn build_state(config: &CatalogConfig, max_connections: u32) -> Result<AppState, SetupError> {
    let db = Database::connect_lazy(config, max_connections)?;
    let fetcher = GitHubRawClient::new(&config.github)?;

    tracing::info!(
        repos = %db.tables().repos,
        skills = %db.tables().skills,
        raw_base = %config.github.raw_base,
        authenticated = config.github.token.is_some(),
        "catalog configured"
    );

    Ok(AppState::new(db, Arc::new(fetcher)))
}
