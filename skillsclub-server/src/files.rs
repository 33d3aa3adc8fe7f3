//! File content resolution
//!
//! Turns `{ repo, path, branch? }` into a fetch target. `repo` is either a
//! catalog id (resolved through the database, which also supplies the
//! default branch) or a literal `owner/name` slug.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::db::Database;
use crate::error::{ApiError, ErrorCode};
use crate::frontmatter::{is_markdown_path, split_document};
use crate::github::{ContentFetcher, FetchError, FileTarget};

const DEFAULT_BRANCH: &str = "main";
const FETCH_FAILED: &str = "Failed to fetch file content";

/// Request body for `POST /api/file/content`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileContentRequest {
    #[serde(default, deserialize_with = "loose_string")]
    pub repo: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub branch: Option<String>,
}

/// Accepts a JSON string or number; anything else reads as absent.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(number_string(&n)),
        _ => None,
    })
}

/// Whole-valued floats (`12.0`) print as integers so they still read as ids.
fn number_string(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Response body for `POST /api/file/content`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileContent {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl FileContent {
    /// Shape fetched text: markdown documents get their frontmatter split
    /// off, everything else is returned as-is.
    pub fn from_fetched(path: &str, raw: String) -> Self {
        if !is_markdown_path(path) {
            return Self {
                content: raw,
                frontmatter: None,
                raw: None,
            };
        }

        let doc = split_document(&raw);
        Self {
            content: doc.body,
            frontmatter: Some(doc.frontmatter),
            raw: Some(raw),
        }
    }
}

/// Validated request fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRequest {
    pub repo: RepoRef,
    pub path: String,
    pub branch: Option<String>,
}

/// How the caller identified the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoRef {
    Id(i64),
    Slug(String),
}

impl RepoRef {
    /// Positive integers are catalog ids; anything else is a slug.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Self::Id(id),
            _ => Self::Slug(raw.to_string()),
        }
    }
}

impl FileRequest {
    pub fn validate(body: FileContentRequest) -> Result<Self, ApiError> {
        let repo = non_blank(body.repo).ok_or(ErrorCode::MissingRepo)?;
        let path = non_blank(body.path).ok_or(ErrorCode::MissingPath)?;
        let branch = non_blank(body.branch);

        if has_dot_segment(&path) {
            return Err(ApiError::BadRequest("Invalid path".into()));
        }
        if branch.as_deref().is_some_and(has_dot_segment) {
            return Err(ApiError::BadRequest("Invalid branch".into()));
        }

        Ok(Self {
            repo: RepoRef::parse(&repo),
            path,
            branch,
        })
    }
}

/// `.` and `..` segments would be normalized by the upstream host and move
/// the request outside the resolved repository.
fn has_dot_segment(value: &str) -> bool {
    value
        .split(['/', '\\'])
        .any(|segment| matches!(segment.trim(), "." | ".."))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Split `owner/name` into its two parts.
pub fn split_slug(slug: &str) -> Result<(String, String), ApiError> {
    let mut parts = slug.trim().split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(ApiError::BadRequest("Invalid repo format".into())),
    }
}

/// Resolve the request into a concrete fetch target.
pub async fn resolve_target(db: &Database, request: &FileRequest) -> Result<FileTarget, ApiError> {
    let (slug, branch) = match &request.repo {
        RepoRef::Id(id) => {
            let repo = db
                .catalog()?
                .get_repo(*id)
                .await?
                .ok_or(ErrorCode::RepoNotFound)?;
            let branch = request
                .branch
                .clone()
                .unwrap_or_else(|| repo.branch_or_main().to_string());
            (repo.repo, branch)
        }
        RepoRef::Slug(slug) => (
            slug.clone(),
            request
                .branch
                .clone()
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        ),
    };

    let (owner, name) = split_slug(&slug)?;
    Ok(FileTarget {
        owner,
        name,
        branch,
        path: request.path.clone(),
    })
}

/// Fetch the target and shape the response.
pub async fn fetch_content(
    fetcher: &dyn ContentFetcher,
    target: &FileTarget,
) -> Result<FileContent, ApiError> {
    let raw = fetcher.fetch_raw(target).await.map_err(|e| match e {
        FetchError::NotFound => ApiError::Code(ErrorCode::FileNotFound),
        FetchError::Status(status) => ApiError::Upstream {
            status: Some(status),
            message: FETCH_FAILED.into(),
        },
        FetchError::Transport(cause) => {
            tracing::error!(error = %cause, path = %target.path, "file fetch failed");
            ApiError::Upstream {
                status: None,
                message: FETCH_FAILED.into(),
            }
        }
    })?;

    Ok(FileContent::from_fetched(&target.path, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Tables;
    use axum::http::StatusCode;
    use serde_json::json;

    fn body(value: Value) -> FileContentRequest {
        serde_json::from_value(value).unwrap()
    }

    fn unconfigured_db() -> Database {
        Database::unconfigured(Tables::new("public", "repos", "skills"))
    }

    #[test]
    fn repo_may_be_number_or_string() {
        let req = FileRequest::validate(body(json!({ "repo": 12, "path": "a.md" }))).unwrap();
        assert_eq!(req.repo, RepoRef::Id(12));

        let req = FileRequest::validate(body(json!({ "repo": " 12 ", "path": "a.md" }))).unwrap();
        assert_eq!(req.repo, RepoRef::Id(12));

        let req =
            FileRequest::validate(body(json!({ "repo": "acme/widgets", "path": "a.md" }))).unwrap();
        assert_eq!(req.repo, RepoRef::Slug("acme/widgets".into()));
    }

    #[test]
    fn non_positive_ids_are_slugs() {
        assert_eq!(RepoRef::parse("0"), RepoRef::Slug("0".into()));
        assert_eq!(RepoRef::parse("-4"), RepoRef::Slug("-4".into()));
    }

    #[test]
    fn whole_float_repo_is_an_id() {
        let req = FileRequest::validate(body(json!({ "repo": 12.0, "path": "a.md" }))).unwrap();
        assert_eq!(req.repo, RepoRef::Id(12));

        let req = FileRequest::validate(body(json!({ "repo": 12.5, "path": "a.md" }))).unwrap();
        assert_eq!(req.repo, RepoRef::Slug("12.5".into()));
    }

    #[test]
    fn dot_segments_in_path_are_rejected() {
        for path in ["../x.md", "docs/../../evil/repo/main/x.md", "./a.md", "a/./b.md", "..", "a\\..\\b"] {
            let err = FileRequest::validate(body(json!({ "repo": "acme/widgets", "path": path })))
                .unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "path={:?}", path);
        }

        let req = FileRequest::validate(body(json!({ "repo": "acme/widgets", "path": "a..b/.hidden.md" })))
            .unwrap();
        assert_eq!(req.path, "a..b/.hidden.md");
    }

    #[test]
    fn dot_segments_in_branch_are_rejected() {
        for branch in ["..", "../other", "main/./x"] {
            let err = FileRequest::validate(body(
                json!({ "repo": "acme/widgets", "path": "a.md", "branch": branch }),
            ))
            .unwrap_err();
            assert!(
                matches!(&err, ApiError::BadRequest(m) if m == "Invalid branch"),
                "branch={:?}",
                branch
            );
        }
    }

    #[test]
    fn missing_repo_checked_before_path() {
        let err = FileRequest::validate(body(json!({}))).unwrap_err();
        assert!(matches!(err, ApiError::Code(ErrorCode::MissingRepo)));

        let err = FileRequest::validate(body(json!({ "repo": "  ", "path": "x" }))).unwrap_err();
        assert!(matches!(err, ApiError::Code(ErrorCode::MissingRepo)));
    }

    #[test]
    fn missing_path() {
        let err = FileRequest::validate(body(json!({ "repo": "acme/widgets", "path": "" })))
            .unwrap_err();
        assert!(matches!(err, ApiError::Code(ErrorCode::MissingPath)));
    }

    #[test]
    fn blank_branch_is_absent() {
        let req = FileRequest::validate(body(json!({
            "repo": "acme/widgets", "path": "README.md", "branch": "  "
        })))
        .unwrap();
        assert_eq!(req.branch, None);
    }

    #[test]
    fn slug_needs_two_segments() {
        assert_eq!(
            split_slug("acme/widgets").unwrap(),
            ("acme".to_string(), "widgets".to_string())
        );
        for bad in ["not-a-valid-slug", "acme/", "/widgets", "a/b/c", ""] {
            let err = split_slug(bad).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{:?}", bad);
            assert_eq!(err.to_string(), "Invalid repo format");
        }
    }

    #[tokio::test]
    async fn literal_slug_defaults_to_main() {
        let req = FileRequest {
            repo: RepoRef::Slug("acme/widgets".into()),
            path: "README.md".into(),
            branch: None,
        };
        let target = resolve_target(&unconfigured_db(), &req).await.unwrap();
        assert_eq!(target.owner, "acme");
        assert_eq!(target.name, "widgets");
        assert_eq!(target.branch, "main");
    }

    #[tokio::test]
    async fn explicit_branch_wins() {
        let req = FileRequest {
            repo: RepoRef::Slug("acme/widgets".into()),
            path: "README.md".into(),
            branch: Some("dev".into()),
        };
        let target = resolve_target(&unconfigured_db(), &req).await.unwrap();
        assert_eq!(target.branch, "dev");
    }

    #[tokio::test]
    async fn id_lookup_needs_database() {
        let req = FileRequest {
            repo: RepoRef::Id(3),
            path: "README.md".into(),
            branch: None,
        };
        let err = resolve_target(&unconfigured_db(), &req).await.unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn markdown_is_split() {
        let raw = "---\nname: pdf\n---\n\n# PDF\n".to_string();
        let content = FileContent::from_fetched("skills/pdf/SKILL.md", raw.clone());
        assert_eq!(content.content, "# PDF\n");
        assert_eq!(content.frontmatter, Some(json!({ "name": "pdf" })));
        assert_eq!(content.raw, Some(raw));
    }

    #[test]
    fn other_files_pass_through() {
        let content = FileContent::from_fetched("src/lib.rs", "fn main() {}".into());
        assert_eq!(content.content, "fn main() {}");
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value, json!({ "content": "fn main() {}" }));
    }
}
