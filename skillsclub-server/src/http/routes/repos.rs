//! Repo endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use super::parse_record_id;
use crate::error::{ApiError, ErrorCode};
use crate::models::{ListQuery, ListResponse, RawListQuery, Repo};
use crate::state::AppState;

/// GET /api/repos - list repos, optionally filtered by name
async fn list_repos(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse<Repo>>, ApiError> {
    let query = ListQuery::from(RawListQuery::from_pairs(pairs));
    let rows = state.db.catalog()?.list_repos(&query).await?;
    tracing::debug!(count = rows.len(), limit = ?query.limit(), "listed repos");

    Ok(Json(ListResponse::new(rows, &query)))
}

/// POST /api/repos/{id} - get a single repo
async fn get_repo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Repo>, ApiError> {
    let id = parse_record_id(&id, ErrorCode::MissingRepoId, ErrorCode::RepoNotFound)?;
    let repo = state
        .db
        .catalog()?
        .get_repo(id)
        .await?
        .ok_or(ErrorCode::RepoNotFound)?;

    Ok(Json(repo))
}

/// Repo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/repos", get(list_repos))
        .route("/api/repos/{id}", get(get_repo).post(get_repo))
}
