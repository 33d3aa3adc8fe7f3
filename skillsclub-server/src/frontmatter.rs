//! YAML frontmatter parsing (gray-matter equivalent)
//!
//! Handles markdown files with a leading YAML block:
//! ```markdown
//! ---
//! name: pdf
//! description: "Read and fill PDF forms"
//! ---
//!
//! Content here
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

const FRONTMATTER_DELIMITER: &str = "---";

/// Frontmatter parsing errors
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("no frontmatter found - document must start with ---")]
    NoFrontmatter,

    #[error("unclosed frontmatter - missing second ---")]
    Unclosed,

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("frontmatter is not representable as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A markdown document split into metadata and body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Parsed metadata; an empty object when the document has none
    pub frontmatter: Value,
    /// Content after the closing delimiter
    pub body: String,
}

/// Parse a leading frontmatter block.
///
/// The opening `---` must be the first line (a BOM is ignored) and the
/// closing `---` must sit on its own line.
pub fn parse_frontmatter(content: &str) -> Result<Document, FrontmatterError> {
    let text = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (first_line, rest) = split_line(text);
    if first_line.trim_end() != FRONTMATTER_DELIMITER {
        return Err(FrontmatterError::NoFrontmatter);
    }

    let mut yaml_len = 0;
    let mut remaining = rest;
    loop {
        if remaining.is_empty() {
            return Err(FrontmatterError::Unclosed);
        }
        let (line, next) = split_line(remaining);
        if line.trim_end() == FRONTMATTER_DELIMITER {
            let yaml = &rest[..yaml_len];
            let body = next.trim_start_matches(['\r', '\n']).to_string();
            return Ok(Document {
                frontmatter: yaml_to_json(yaml)?,
                body,
            });
        }
        yaml_len += remaining.len() - next.len();
        remaining = next;
    }
}

/// Split a document, falling back to the raw text when there is no usable
/// frontmatter block.
pub fn split_document(content: &str) -> Document {
    match parse_frontmatter(content) {
        Ok(doc) => doc,
        Err(FrontmatterError::NoFrontmatter) => Document {
            frontmatter: Value::Object(Map::new()),
            body: content.to_string(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed frontmatter");
            Document {
                frontmatter: Value::Object(Map::new()),
                body: content.to_string(),
            }
        }
    }
}

/// Returns (line without terminator, rest after the newline).
fn split_line(text: &str) -> (&str, &str) {
    match text.find('\n') {
        Some(pos) => (text[..pos].trim_end_matches('\r'), &text[pos + 1..]),
        None => (text, ""),
    }
}

fn yaml_to_json(yaml: &str) -> Result<Value, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    let parsed: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    match parsed {
        serde_yaml::Value::Null => Ok(Value::Object(Map::new())),
        other => Ok(serde_json::to_value(other)?),
    }
}

/// Whether a repository path names a markdown document
pub fn is_markdown_path(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            matches!(ext.to_ascii_lowercase().as_str(), "md" | "markdown" | "mdx")
        }
        _ => false,
    }
}
