//! Record representation and identity helpers.

use serde_json::{Map, Value};

use crate::error::InvalidInputError;
use crate::{RecordId, Result};

/// A row: field names to scalar or null values, in insertion order.
pub type Record = Map<String, Value>;

/// Extract the primary id from a created record.
///
/// Returns the first field whose name ends in `id` (case-insensitively) and
/// whose value is a string shaped like a hyphenated GUID.
///
/// # Errors
///
/// Returns [`InvalidInputError::MissingRecordId`] if no field qualifies.
///
/// # Example
///
/// ```
/// use dataverse_core::{Record, extract_id};
/// use serde_json::json;
///
/// let record: Record = serde_json::from_value(json!({
///     "foo_caseid": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
///     "bar": 1
/// })).unwrap();
/// assert_eq!(extract_id(&record).unwrap().as_str(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
pub fn extract_id(record: &Record) -> Result<RecordId> {
    record
        .iter()
        .filter(|(name, _)| name.to_ascii_lowercase().ends_with("id"))
        .find_map(|(_, value)| value.as_str().filter(|s| RecordId::is_valid(s)))
        .map(RecordId::new)
        .unwrap_or_else(|| Err(InvalidInputError::MissingRecordId.into()))
}

/// Format a key as an entity key segment.
///
/// Keys already in `(...)` form are used as given.
pub fn format_key(key: &str) -> String {
    let key = key.trim();
    if key.starts_with('(') && key.ends_with(')') {
        key.to_string()
    } else {
        format!("({})", key)
    }
}
