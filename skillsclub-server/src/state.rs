//! Application state shared across handlers

use std::sync::Arc;

use crate::db::Database;
use crate::github::ContentFetcher;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub fetcher: Arc<dyn ContentFetcher>,
}

impl AppState {
    pub fn new(db: Database, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { db, fetcher }
    }
}
