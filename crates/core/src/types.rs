use crate::error::CoreError;

/// Catalog primary keys are PostgreSQL SERIAL (INT4).
pub type DbId = i32;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse an identifier taken verbatim from a request path.
///
/// Surrounding whitespace is not trimmed; `" 7"` is rejected like any other
/// non-numeric segment.
pub fn parse_db_id(raw: &str) -> Result<DbId, CoreError> {
    raw.parse::<DbId>()
        .map_err(|_| CoreError::Validation(format!("'{raw}' is not a valid identifier")))
}
