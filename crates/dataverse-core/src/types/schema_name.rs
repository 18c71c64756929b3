//! Table schema name type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, InvalidInputError};

/// Publisher prefix used when a friendly table name carries none.
pub const DEFAULT_PUBLISHER: &str = "new";

/// A table schema name of the form `<publisher>_<Name>`.
///
/// Friendly names without an underscore are converted to PascalCase under
/// the default `new` publisher; names that already contain an underscore
/// are taken as full schema names.
///
/// # Example
///
/// ```
/// use dataverse_core::SchemaName;
///
/// let schema = SchemaName::from_table_name("sample item").unwrap();
/// assert_eq!(schema.as_str(), "new_SampleItem");
/// assert_eq!(schema.publisher_prefix(), "new");
/// assert_eq!(schema.attribute("unit price"), "new_UnitPrice");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaName(String);

impl SchemaName {
    /// Normalize a table name into a schema name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name has no alphanumeric content.
    pub fn from_table_name(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        let schema = if name.contains('_') {
            name.to_string()
        } else {
            format!("{}_{}", DEFAULT_PUBLISHER, to_pascal(name))
        };

        let (prefix, rest) = schema.split_once('_').unwrap_or(("", ""));
        if prefix.is_empty() || rest.is_empty() {
            return Err(InvalidInputError::SchemaName {
                value: name.to_string(),
                reason: "expected '<publisher>_<Name>' or a friendly name".to_string(),
            }
            .into());
        }

        Ok(Self(schema))
    }

    /// Returns the schema name string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The segment before the first underscore.
    pub fn publisher_prefix(&self) -> &str {
        self.0.split_once('_').map(|(p, _)| p).unwrap_or(DEFAULT_PUBLISHER)
    }

    /// Schema name of the primary name attribute, `<prefix>_Name`.
    pub fn primary_name_attribute(&self) -> String {
        format!("{}_Name", self.publisher_prefix())
    }

    /// Schema name for a column under this table's publisher prefix.
    pub fn attribute(&self, column: &str) -> String {
        format!("{}_{}", self.publisher_prefix(), to_pascal(column))
    }

    /// Single-quoted form for use inside an OData `$filter`.
    pub fn filter_literal(&self) -> String {
        format!("'{}'", self.0.replace('\'', "''"))
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SchemaName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Split on non-alphanumerics and upper-case the first letter of each part.
pub fn to_pascal(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
