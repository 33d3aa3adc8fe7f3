//! Route handlers organized by resource

pub mod files;
pub mod health;
pub mod repos;
pub mod skills;

use crate::error::{ApiError, ErrorCode};

/// Parse a record id from a path segment.
///
/// Blank ids are a missing parameter; ids that are not positive integers
/// cannot match a row and report as not found.
pub(crate) fn parse_record_id(
    raw: &str,
    missing: ErrorCode,
    not_found: ErrorCode,
) -> Result<i64, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(missing.into());
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(not_found.into()),
    }
}
