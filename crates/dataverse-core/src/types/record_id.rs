//! Record identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Length of a hyphenated GUID.
const GUID_LEN: usize = 36;

/// A record's primary key: a 36-character hyphenated GUID.
///
/// # Example
///
/// ```
/// use dataverse_core::RecordId;
///
/// let id = RecordId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
/// assert_eq!(id.as_key(), "(3fa85f64-5717-4562-b3fc-2c963f66afa6)");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Create a new record id, validating the format.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error unless the value is 36 hex digits or hyphens.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        let trimmed = s.trim();
        Self::validate(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    /// Check whether a string has the GUID shape without building an id.
    pub fn is_valid(s: &str) -> bool {
        Self::validate(s.trim()).is_ok()
    }

    /// Returns the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the id wrapped as an entity key segment, `(<id>)`.
    pub fn as_key(&self) -> String {
        format!("({})", self.0)
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.len() != GUID_LEN {
            return Err(InvalidInputError::RecordId {
                value: s.to_string(),
                reason: format!("must be {} characters", GUID_LEN),
            }
            .into());
        }

        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit() && *c != '-') {
            return Err(InvalidInputError::RecordId {
                value: s.to_string(),
                reason: format!("contains invalid character '{}'", c),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
