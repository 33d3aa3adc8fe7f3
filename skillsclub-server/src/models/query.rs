//! List query normalization
//!
//! Raw query-string values arrive as optional strings and are turned into
//! typed filters. Normalization never fails: anything absent or unparseable
//! degrades to "no filter".

use serde::{Deserialize, Serialize};

/// Maximum rows per page
pub const MAX_LIMIT: u32 = 100;

/// Query string as received. Every field stays a string so that a bad value
/// never rejects the request at the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListQuery {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub repo_id: Option<String>,
}

impl RawListQuery {
    /// Collect known keys from decoded query pairs. The first occurrence of
    /// a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut raw.q,
                "limit" => &mut raw.limit,
                "offset" => &mut raw.offset,
                "repo_id" => &mut raw.repo_id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        raw
    }
}

/// A bounded page of rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Rows per page (1..=100)
    pub limit: u32,
    /// Rows to skip
    pub offset: u32,
}

/// Normalized list filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Trimmed, non-empty free-text filter
    pub q: Option<String>,
    /// `None` means return every matching row
    pub page: Option<Page>,
    /// Restrict skills to one repository
    pub repo_id: Option<i64>,
}

impl ListQuery {
    pub fn normalize(raw: &RawListQuery) -> Self {
        let page = raw.limit.as_deref().and_then(parse_limit).map(|limit| Page {
            limit,
            offset: raw.offset.as_deref().map(parse_offset).unwrap_or(0),
        });

        Self {
            q: raw
                .q
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_owned),
            page,
            repo_id: raw
                .repo_id
                .as_deref()
                .and_then(|id| id.trim().parse::<i64>().ok()),
        }
    }

    /// Effective limit as reported in list responses
    pub fn limit(&self) -> Option<u32> {
        self.page.map(|p| p.limit)
    }

    /// Effective offset; always 0 when unpaginated
    pub fn offset(&self) -> u32 {
        self.page.map(|p| p.offset).unwrap_or(0)
    }

    /// ILIKE pattern for the free-text filter, with wildcards in the user
    /// text escaped so it matches literally.
    pub fn like_pattern(&self) -> Option<String> {
        self.q.as_deref().map(|q| format!("%{}%", escape_like(q)))
    }
}

impl From<RawListQuery> for ListQuery {
    fn from(raw: RawListQuery) -> Self {
        Self::normalize(&raw)
    }
}

/// Parse a numeric-like string into a whole number, flooring fractions.
fn parse_number(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then(|| value.floor())
}

/// Limits below 1 are treated as absent; large ones clamp to [`MAX_LIMIT`].
fn parse_limit(raw: &str) -> Option<u32> {
    let value = parse_number(raw)?;
    if value < 1.0 {
        return None;
    }
    Some(value.min(MAX_LIMIT as f64) as u32)
}

fn parse_offset(raw: &str) -> u32 {
    match parse_number(raw) {
        Some(value) if value > 0.0 => value.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

fn escape_like(q: &str) -> String {
    let mut escaped = String::with_capacity(q.len());
    for c in q.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// List response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, query: &ListQuery) -> Self {
        Self {
            data,
            limit: query.limit(),
            offset: query.offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(q: Option<&str>, limit: Option<&str>, offset: Option<&str>) -> RawListQuery {
        RawListQuery {
            q: q.map(String::from),
            limit: limit.map(String::from),
            offset: offset.map(String::from),
            repo_id: None,
        }
    }

    #[test]
    fn limit_is_clamped_to_max() {
        for (input, expected) in [("1", 1), ("20", 20), ("100", 100), ("101", 100), ("5000", 100)] {
            let query = ListQuery::normalize(&raw(None, Some(input), None));
            assert_eq!(query.limit(), Some(expected), "limit={}", input);
        }
    }

    #[test]
    fn limit_accepts_numeric_like_input() {
        assert_eq!(ListQuery::normalize(&raw(None, Some(" 15 "), None)).limit(), Some(15));
        assert_eq!(ListQuery::normalize(&raw(None, Some("15.9"), None)).limit(), Some(15));
        assert_eq!(ListQuery::normalize(&raw(None, Some("1e1"), None)).limit(), Some(10));
    }

    #[test]
    fn invalid_limit_is_unbounded() {
        for input in ["", "abc", "0", "-5", "0.5", "NaN", "inf"] {
            let query = ListQuery::normalize(&raw(None, Some(input), Some("40")));
            assert_eq!(query.page, None, "limit={:?}", input);
            assert_eq!(query.offset(), 0, "limit={:?}", input);
        }
    }

    #[test]
    fn offset_forced_to_zero_without_limit() {
        let query = ListQuery::normalize(&raw(None, None, Some("30")));
        assert_eq!(query.limit(), None);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn offset_applies_with_limit() {
        let query = ListQuery::normalize(&raw(None, Some("10"), Some("30")));
        assert_eq!(query.page, Some(Page { limit: 10, offset: 30 }));
    }

    #[test]
    fn bad_offset_defaults_to_zero() {
        for input in ["", "x", "-3"] {
            let query = ListQuery::normalize(&raw(None, Some("10"), Some(input)));
            assert_eq!(query.offset(), 0, "offset={:?}", input);
        }
    }

    #[test]
    fn blank_q_is_no_filter() {
        for input in ["", "   ", "\t\n"] {
            let query = ListQuery::normalize(&raw(Some(input), None, None));
            assert_eq!(query.q, None);
            assert_eq!(query.like_pattern(), None);
        }
        assert_eq!(ListQuery::normalize(&raw(None, None, None)), ListQuery::default());
    }

    #[test]
    fn q_is_trimmed_into_pattern() {
        let query = ListQuery::normalize(&raw(Some("  pdf  "), None, None));
        assert_eq!(query.q.as_deref(), Some("pdf"));
        assert_eq!(query.like_pattern().as_deref(), Some("%pdf%"));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        let query = ListQuery::normalize(&raw(Some("100%_done\\"), None, None));
        assert_eq!(query.like_pattern().as_deref(), Some("%100\\%\\_done\\\\%"));
    }

    #[test]
    fn repo_id_requires_number() {
        let mut input = RawListQuery {
            repo_id: Some(" 42 ".into()),
            ..Default::default()
        };
        assert_eq!(ListQuery::normalize(&input).repo_id, Some(42));

        input.repo_id = Some("acme".into());
        assert_eq!(ListQuery::normalize(&input).repo_id, None);
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let pairs = [
            ("limit", "5"),
            ("q", " pdf "),
            ("limit", "10"),
            ("q", "docs"),
            ("sort", "name"),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string()));

        let raw = RawListQuery::from_pairs(pairs);
        assert_eq!(raw.limit.as_deref(), Some("5"));
        assert_eq!(raw.q.as_deref(), Some(" pdf "));
        assert_eq!(raw.offset, None);

        let query = ListQuery::from(raw);
        assert_eq!(query.limit(), Some(5));
        assert_eq!(query.q.as_deref(), Some("pdf"));
    }

    #[test]
    fn response_envelope_serializes_null_limit() {
        let query = ListQuery::default();
        let response: ListResponse<u8> = ListResponse::new(vec![], &query);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, serde_json::json!({ "data": [], "limit": null, "offset": 0 }));
    }
}
