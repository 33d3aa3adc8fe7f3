//! Skill endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use super::parse_record_id;
use crate::error::{ApiError, ErrorCode};
use crate::models::{ListQuery, ListResponse, RawListQuery, SkillRow};
use crate::state::AppState;

/// GET /api/skills - list skills with their repo name
async fn list_skills(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse<SkillRow>>, ApiError> {
    let query = ListQuery::from(RawListQuery::from_pairs(pairs));
    let rows = state.db.catalog()?.list_skills(&query).await?;
    tracing::debug!(
        count = rows.len(),
        repo_id = ?query.repo_id,
        limit = ?query.limit(),
        "listed skills"
    );

    Ok(Json(ListResponse::new(rows, &query)))
}

/// POST /api/skills/{id} - get a single skill
async fn get_skill(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SkillRow>, ApiError> {
    let id = parse_record_id(&id, ErrorCode::MissingSkillId, ErrorCode::SkillNotFound)?;
    let skill = state
        .db
        .catalog()?
        .get_skill(id)
        .await?
        .ok_or(ErrorCode::SkillNotFound)?;

    Ok(Json(skill))
}

/// Skill routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/skills", get(list_skills))
        .route("/api/skills/{id}", get(get_skill).post(get_skill))
}
