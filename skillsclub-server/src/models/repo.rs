//! Repository records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A GitHub repository tracked by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Repo {
    pub id: i64,
    pub name: String,
    /// `owner/name` slug
    pub repo: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub stars: Option<i64>,
    pub watchers: Option<i64>,
    pub forks: Option<i64>,
    pub default_branch: Option<String>,
}

impl Repo {
    /// Branch to read from when the caller did not ask for one
    pub fn branch_or_main(&self) -> &str {
        self.default_branch
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or("main")
    }
}
