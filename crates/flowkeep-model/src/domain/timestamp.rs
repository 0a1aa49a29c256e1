//! ISO-8601 helpers shared by the configuration epoch and the in-memory provider.
//!
//! Two renderings are produced: a full RFC 3339 datetime (seconds precision, UTC offset
//! kept as given) and a bare calendar date (`YYYY-MM-DD`). Both are valid ISO-8601.
use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description};

use crate::error::{ModelError, ModelResult};

/// Render a datetime as RFC 3339, truncated to whole seconds.
pub fn format_iso8601(at: OffsetDateTime) -> ModelResult<String> {
    let at = at.replace_nanosecond(0).unwrap_or(at);
    at.format(&Rfc3339)
        .map_err(|e| ModelError::InvalidTimestamp(format!("{at}: {e}")))
}

/// Render a calendar date as `YYYY-MM-DD`.
pub fn format_iso8601_date(date: Date) -> ModelResult<String> {
    date.format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| ModelError::InvalidTimestamp(format!("{date}: {e}")))
}

/// Parse an RFC 3339 datetime or a `YYYY-MM-DD` date.
///
/// A bare date is interpreted as midnight UTC.
pub fn parse_iso8601(raw: &str) -> ModelResult<OffsetDateTime> {
    let s = raw.trim();
    if let Ok(at) = OffsetDateTime::parse(s, &Rfc3339) {
        return Ok(at);
    }
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map(|d| d.midnight().assume_utc())
        .map_err(|_| ModelError::InvalidTimestamp(raw.to_string()))
}
