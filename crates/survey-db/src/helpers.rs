//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. Dates are stored as `YYYY-MM-DD` text; classifications as their
//! canonical label, parsed leniently so free-text rows still load.

use chrono::NaiveDate;
use survey_core::enums::ResponseType;

use crate::error::DatabaseError;

/// Storage format for response dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a TEXT date column.
///
/// Accepts a plain date or a datetime whose first ten characters are the date
/// (`"2024-01-05 00:00:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if no date can be recovered.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    let candidate = s.trim();
    NaiveDate::parse_from_str(candidate, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(candidate.get(..10).unwrap_or(candidate), DATE_FORMAT))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

/// Format a date for storage.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored classification.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the label is not a known classification.
pub fn parse_response_type(s: &str) -> Result<ResponseType, DatabaseError> {
    s.parse()
        .map_err(|e| DatabaseError::Query(format!("Failed to parse response_type: {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER column that must fit in `i32`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the stored value is out of range.
pub fn get_i32(row: &libsql::Row, idx: i32) -> Result<i32, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    i32::try_from(raw).map_err(|_| DatabaseError::Query(format!("value {raw} out of range for i32")))
}
