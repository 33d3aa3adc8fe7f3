//! Database connection pool management
//!
//! The pool is created once at startup with `connect_lazy`, so the server
//! comes up even when PostgreSQL is unreachable; connections are opened on
//! the first query. A missing `DATABASE_URL` is reported per request as a
//! configuration error.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{CatalogRepo, Tables};
use crate::config::CatalogConfig;
use crate::error::ApiError;

/// Default maximum connections for the pool.
/// Kept low for a read-only catalog.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Process-wide database handle
#[derive(Clone)]
pub struct Database {
    pool: Option<PgPool>,
    tables: Arc<Tables>,
}

impl Database {
    /// Build the handle from configuration without connecting.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is set but cannot be parsed.
    pub fn connect_lazy(config: &CatalogConfig, max_connections: u32) -> Result<Self, sqlx::Error> {
        let tables = Arc::new(Tables::from_config(config));

        let pool = match config.database_url.as_deref() {
            Some(url) => Some(
                PgPoolOptions::new()
                    .max_connections(max_connections)
                    .connect_lazy(url)?,
            ),
            None => {
                tracing::warn!("DATABASE_URL is not set; catalog queries will fail");
                None
            }
        };

        Ok(Self { pool, tables })
    }

    /// Wrap an existing pool (for testing)
    pub fn from_pool(pool: PgPool, tables: Tables) -> Self {
        Self {
            pool: Some(pool),
            tables: Arc::new(tables),
        }
    }

    /// Handle with no connection string configured
    pub fn unconfigured(tables: Tables) -> Self {
        Self {
            pool: None,
            tables: Arc::new(tables),
        }
    }

    pub fn pool(&self) -> Result<&PgPool, ApiError> {
        self.pool
            .as_ref()
            .ok_or_else(|| ApiError::Config("DATABASE_URL is not set".into()))
    }

    /// Whether a connection URL was supplied. Says nothing about reachability.
    pub fn is_configured(&self) -> bool {
        self.pool.is_some()
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Catalog queries bound to this pool
    pub fn catalog(&self) -> Result<CatalogRepo<'_>, ApiError> {
        Ok(CatalogRepo::new(self.pool()?, &self.tables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn unconfigured_pool_is_config_error() {
        let db = Database::unconfigured(Tables::new("public", "repos", "skills"));
        let err = db.pool().unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "DATABASE_URL is not set");
        assert!(!db.is_configured());
    }

    #[tokio::test]
    async fn lazy_pool_does_not_connect() {
        let config = CatalogConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://nobody@127.0.0.1:1/none".to_string()),
            _ => None,
        });
        let db = Database::connect_lazy(&config, DEFAULT_MAX_CONNECTIONS).unwrap();
        assert!(db.is_configured());
        assert!(db.pool().is_ok());
        assert_eq!(db.tables().repos, r#""public"."repos""#);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let config = CatalogConfig::from_env();
        let db = Database::connect_lazy(&config, DEFAULT_MAX_CONNECTIONS).unwrap();

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(db.pool().unwrap())
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }
}
