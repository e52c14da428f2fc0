//! Structural row validation

use super::parse::RawRow;
use crate::core::models::{Priority, RowError};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Validate one row's structure: required title, known priority, parseable
/// due date. Returns every problem found, not just the first.
pub fn validate_row(row: &RawRow) -> Vec<RowError> {
    let mut errors = Vec::new();

    match row.get("title") {
        Some(title) if !title.trim().is_empty() => {}
        _ => errors.push(RowError::new(row.row_number, "title", "title is required")),
    }

    if let Some(raw) = row.get("priority") {
        if Priority::parse(raw).is_none() {
            errors.push(RowError::new(
                row.row_number,
                "priority",
                format!(
                    "unknown priority \"{}\" (expected one of: critical, high, medium, low)",
                    raw
                ),
            ));
        }
    }

    if let Some(raw) = row.get("due_date") {
        if parse_due_date(raw).is_none() {
            errors.push(RowError::new(
                row.row_number,
                "due_date",
                format!("invalid date \"{}\" (expected YYYY-MM-DD or RFC 3339)", raw),
            ));
        }
    }

    errors
}

/// Parse a due date as `YYYY-MM-DD` (midnight UTC) or a full RFC 3339
/// timestamp.
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
