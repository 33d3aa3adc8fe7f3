//! API error types with IntoResponse
//!
//! Taxonomy codes always produce the same status and message. Everything
//! else (configuration, database, upstream) is wrapped with the best status
//! available and the underlying message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Closed set of failures with stable status/message pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MissingRepoId,
    MissingPath,
    MissingRepo,
    MissingSkillId,
    RepoNotFound,
    SkillNotFound,
    FileNotFound,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 7] = [
        ErrorCode::MissingRepoId,
        ErrorCode::MissingPath,
        ErrorCode::MissingRepo,
        ErrorCode::MissingSkillId,
        ErrorCode::RepoNotFound,
        ErrorCode::SkillNotFound,
        ErrorCode::FileNotFound,
    ];

    /// Symbolic name as exposed in response bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingRepoId => "MISSING_REPO_ID",
            Self::MissingPath => "MISSING_PATH",
            Self::MissingRepo => "MISSING_REPO",
            Self::MissingSkillId => "MISSING_SKILL_ID",
            Self::RepoNotFound => "REPO_NOT_FOUND",
            Self::SkillNotFound => "SKILL_NOT_FOUND",
            Self::FileNotFound => "FILE_NOT_FOUND",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::MissingRepoId | Self::MissingPath | Self::MissingRepo | Self::MissingSkillId => {
                StatusCode::BAD_REQUEST
            }
            Self::RepoNotFound | Self::SkillNotFound | Self::FileNotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::MissingRepoId => "Missing repo id",
            Self::MissingPath => "Missing path",
            Self::MissingRepo => "Missing repo",
            Self::MissingSkillId => "Missing skill id",
            Self::RepoNotFound => "Repo not found",
            Self::SkillNotFound => "Skill not found",
            Self::FileNotFound => "File not found",
        }
    }
}

/// API error type with automatic HTTP status mapping
#[derive(Debug, Error)]
pub enum ApiError {
    /// Taxonomy error (fixed status and message)
    #[error("{}", .0.message())]
    Code(ErrorCode),

    /// Malformed input outside the taxonomy (400)
    #[error("{0}")]
    BadRequest(String),

    /// Upstream failure; `status` is reused when the upstream provided one
    #[error("{message}")]
    Upstream {
        status: Option<StatusCode>,
        message: String,
    },

    /// Missing or invalid server configuration (500)
    #[error("{0}")]
    Config(String),

    /// Database failure (500)
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Code(code) => code.status(),
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Config(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Code(code) => code.as_str(),
            Self::BadRequest(_) => "bad_request",
            Self::Upstream { .. } => "upstream_error",
            Self::Config(_) => "config_error",
            Self::Database(_) => "database_error",
        }
    }
}

impl From<ErrorCode> for ApiError {
    fn from(code: ErrorCode) -> Self {
        Self::Code(code)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(kind = self.kind(), status = status.as_u16(), "{}", message);
        }

        let body = json!({
            "error": self.kind(),
            "statusCode": status.as_u16(),
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
