//! Skill records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A skill file discovered in a repository, with the owning repo's
/// name/slug denormalized from the join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: i64,
    pub repo_id: i64,
    /// File path within the repository
    pub path: String,
    pub mode: Option<String>,
    pub sha: Option<String>,
    pub size: Option<i64>,
    pub is_skill_md: Option<bool>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// `null` when the referenced repo row is missing
    pub repo_name: Option<String>,
    pub repo_slug: Option<String>,
}
