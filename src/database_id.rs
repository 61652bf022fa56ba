//! Database ID type definition and validation of IDs taken from request paths.

use crate::Error;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// Parse a record ID from a request path segment.
///
/// IDs are SQLite row IDs, so only positive integers are accepted.
///
/// # Errors
/// Returns [Error::InvalidRecordId] if `raw_id` is not a positive integer.
pub fn validate_record_id(raw_id: &str) -> Result<DatabaseId, Error> {
    match raw_id.trim().parse::<DatabaseId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::InvalidRecordId(raw_id.to_owned())),
    }
}
