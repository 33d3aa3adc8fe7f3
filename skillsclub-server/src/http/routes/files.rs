//! File content proxy endpoint

use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use crate::error::ApiError;
use crate::files::{fetch_content, resolve_target, FileContent, FileContentRequest, FileRequest};
use crate::state::AppState;

/// POST /api/file/content - fetch a file from GitHub
///
/// The body is parsed by hand so an empty body or a JSON `null` reads as
/// `{}` and a missing content-type is not rejected.
async fn file_content(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<FileContent>, ApiError> {
    let body: FileContentRequest = if body.iter().all(u8::is_ascii_whitespace) {
        FileContentRequest::default()
    } else {
        serde_json::from_slice::<Option<FileContentRequest>>(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?
            .unwrap_or_default()
    };

    let request = FileRequest::validate(body)?;
    let target = resolve_target(&state.db, &request).await?;
    tracing::info!(
        owner = %target.owner,
        repo = %target.name,
        branch = %target.branch,
        path = %target.path,
        "fetching file content"
    );

    let content = fetch_content(state.fetcher.as_ref(), &target).await?;
    Ok(Json(content))
}

/// File routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/file/content", post(file_content))
}
