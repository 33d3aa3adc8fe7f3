//! Catalog configuration - database and GitHub settings
//!
//! Configuration is loaded from environment variables:
//! - `DATABASE_URL`: PostgreSQL connection string (required for catalog queries)
//! - `DATABASE_SCHEMA`: Schema holding the catalog tables (default: public)
//! - `REPOS_TABLE` / `SKILLS_TABLE`: Table names (default: repos / skills)
//! - `GITHUB_TOKEN`: Optional bearer token for raw content requests
//! - `GITHUB_RAW_BASE`: Raw content host (default: https://raw.githubusercontent.com)

use std::time::Duration;

pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_REPOS_TABLE: &str = "repos";
pub const DEFAULT_SKILLS_TABLE: &str = "skills";
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Upstream fetch timeout for file content
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Catalog configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub database_url: Option<String>,
    pub schema: String,
    pub repos_table: String,
    pub skills_table: String,
    pub github: GitHubConfig,
}

/// Settings for the raw content proxy
#[derive(Clone)]
pub struct GitHubConfig {
    pub raw_base: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

// Keeps the token out of logs.
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("raw_base", &self.raw_base)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CatalogConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup (for testing)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            database_url: get("DATABASE_URL"),
            schema: get("DATABASE_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
            repos_table: get("REPOS_TABLE").unwrap_or_else(|| DEFAULT_REPOS_TABLE.to_string()),
            skills_table: get("SKILLS_TABLE").unwrap_or_else(|| DEFAULT_SKILLS_TABLE.to_string()),
            github: GitHubConfig {
                raw_base: get("GITHUB_RAW_BASE")
                    .map(|base| base.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_RAW_BASE.to_string()),
                token: get("GITHUB_TOKEN"),
                timeout: FETCH_TIMEOUT,
            },
        }
    }

    /// Override the database URL (CLI flag takes precedence over env)
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.database_url = Some(url);
        }
        self
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            raw_base: DEFAULT_RAW_BASE.to_string(),
            token: None,
            timeout: FETCH_TIMEOUT,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
