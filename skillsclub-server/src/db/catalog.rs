//! Catalog queries for repos and skills
//!
//! Every list runs as one statement: filters, join and pagination are
//! assembled with `QueryBuilder`, and rows are ordered by id so pages are
//! stable.

use sqlx::{PgPool, Postgres, QueryBuilder};

use super::Tables;
use crate::models::{ListQuery, Repo, SkillRow};

const REPO_COLUMNS: &str = "r.id::int8 AS id, r.name, r.repo, r.description, \
     r.created_at::timestamptz AS created_at, r.updated_at::timestamptz AS updated_at, \
     r.pushed_at::timestamptz AS pushed_at, r.stars::int8 AS stars, \
     r.watchers::int8 AS watchers, r.forks::int8 AS forks, r.default_branch";

const SKILL_COLUMNS: &str = "s.id::int8 AS id, s.repo_id::int8 AS repo_id, s.path, \
     s.mode::text AS mode, s.sha::text AS sha, s.size::int8 AS size, s.is_skill_md, \
     s.name, s.description, s.created_at::timestamptz AS created_at, \
     r.name AS repo_name, r.repo AS repo_slug";

/// Catalog repository
pub struct CatalogRepo<'a> {
    pool: &'a PgPool,
    tables: &'a Tables,
}

impl<'a> CatalogRepo<'a> {
    pub fn new(pool: &'a PgPool, tables: &'a Tables) -> Self {
        Self { pool, tables }
    }

    /// List repos, optionally filtered by name and paginated.
    pub async fn list_repos(&self, query: &ListQuery) -> Result<Vec<Repo>, sqlx::Error> {
        let mut builder = list_repos_query(self.tables, query);
        builder.build_query_as::<Repo>().fetch_all(self.pool).await
    }

    /// Fetch one repo by id.
    pub async fn get_repo(&self, id: i64) -> Result<Option<Repo>, sqlx::Error> {
        let mut builder = get_repo_query(self.tables, id);
        builder.build_query_as::<Repo>().fetch_optional(self.pool).await
    }

    /// List skills with their repo name.
    ///
    /// LEFT JOIN keeps skills whose repo row is missing; filtering by
    /// `repo_id` switches to an inner join.
    pub async fn list_skills(&self, query: &ListQuery) -> Result<Vec<SkillRow>, sqlx::Error> {
        let mut builder = list_skills_query(self.tables, query);
        builder.build_query_as::<SkillRow>().fetch_all(self.pool).await
    }

    /// Fetch one skill by id, with repo name and slug when the repo exists.
    pub async fn get_skill(&self, id: i64) -> Result<Option<SkillRow>, sqlx::Error> {
        let mut builder = get_skill_query(self.tables, id);
        builder.build_query_as::<SkillRow>().fetch_optional(self.pool).await
    }
}

pub(crate) fn list_repos_query(tables: &Tables, query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder.push(REPO_COLUMNS);
    builder.push(" FROM ").push(&tables.repos).push(" r");

    if let Some(pattern) = query.like_pattern() {
        builder.push(" WHERE r.name ILIKE ").push_bind(pattern);
    }

    builder.push(" ORDER BY r.id");
    push_page(&mut builder, query);
    builder
}

pub(crate) fn get_repo_query(tables: &Tables, id: i64) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder.push(REPO_COLUMNS);
    builder.push(" FROM ").push(&tables.repos).push(" r");
    builder.push(" WHERE r.id = ").push_bind(id);
    builder.push(" LIMIT 1");
    builder
}

pub(crate) fn list_skills_query(tables: &Tables, query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let join = if query.repo_id.is_some() {
        " JOIN "
    } else {
        " LEFT JOIN "
    };

    let mut builder = QueryBuilder::new("SELECT ");
    builder.push(SKILL_COLUMNS);
    builder.push(" FROM ").push(&tables.skills).push(" s");
    builder.push(join).push(&tables.repos).push(" r ON r.id = s.repo_id");

    let mut clause = " WHERE ";
    if let Some(repo_id) = query.repo_id {
        builder.push(clause).push("s.repo_id = ").push_bind(repo_id);
        clause = " AND ";
    }
    if let Some(pattern) = query.like_pattern() {
        builder.push(clause);
        builder.push("(s.name ILIKE ").push_bind(pattern.clone());
        builder.push(" OR COALESCE(s.description, '') ILIKE ").push_bind(pattern);
        builder.push(")");
    }

    builder.push(" ORDER BY s.id");
    push_page(&mut builder, query);
    builder
}

pub(crate) fn get_skill_query(tables: &Tables, id: i64) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder.push(SKILL_COLUMNS);
    builder.push(" FROM ").push(&tables.skills).push(" s");
    builder.push(" LEFT JOIN ").push(&tables.repos).push(" r ON r.id = s.repo_id");
    builder.push(" WHERE s.id = ").push_bind(id);
    builder.push(" LIMIT 1");
    builder
}

fn push_page(builder: &mut QueryBuilder<'static, Postgres>, query: &ListQuery) {
    if let Some(page) = query.page {
        builder.push(" LIMIT ").push_bind(i64::from(page.limit));
        builder.push(" OFFSET ").push_bind(i64::from(page.offset));
    }
}
