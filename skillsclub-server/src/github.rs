//! GitHub raw content client
//!
//! Fetches a single file at a branch from raw.githubusercontent.com (or a
//! configured mirror). One attempt per call, bounded by a timeout.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::GitHubConfig;

const CLIENT_USER_AGENT: &str = concat!("skillsclub/", env!("CARGO_PKG_VERSION"));
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";

/// A file to fetch: `owner/name` at `branch`, path relative to the repo root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub owner: String,
    pub name: String,
    pub branch: String,
    pub path: String,
}

impl FileTarget {
    /// Build the raw content URL with every path segment percent-encoded.
    pub fn raw_url(&self, base: &str) -> String {
        let mut url = base.trim_end_matches('/').to_string();
        for segment in [self.owner.as_str(), self.name.as_str()]
            .into_iter()
            .chain(segments(&self.branch))
            .chain(segments(&self.path))
        {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }
}

fn segments(value: &str) -> impl Iterator<Item = &str> {
    value.split('/').filter(|s| !s.is_empty())
}

/// Errors from the upstream fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("file not found upstream")]
    NotFound,

    #[error("upstream returned {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Transport(String),
}

/// Source of raw file content
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_raw(&self, target: &FileTarget) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher for raw.githubusercontent.com
pub struct GitHubRawClient {
    http: Client,
    raw_base: String,
}

impl GitHubRawClient {
    pub fn new(config: &GitHubConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(RAW_MEDIA_TYPE));

        if let Some(token) = &config.token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("GITHUB_TOKEN contains invalid header characters; ignoring"),
            }
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            raw_base: config.raw_base.clone(),
        })
    }
}

#[async_trait]
impl ContentFetcher for GitHubRawClient {
    async fn fetch_raw(&self, target: &FileTarget) -> Result<String, FetchError> {
        let url = target.raw_url(&self.raw_base);
        tracing::debug!(%url, "fetching raw file");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "upstream fetch failed");
            return Err(FetchError::Status(status));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
