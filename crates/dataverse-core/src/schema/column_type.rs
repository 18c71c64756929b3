//! Semantic column types.

use std::fmt;

/// A column type accepted when provisioning a table.
///
/// # Example
///
/// ```
/// use dataverse_core::schema::ColumnType;
///
/// assert_eq!(ColumnType::parse(" Money "), Some(ColumnType::Decimal));
/// assert_eq!(ColumnType::parse("uuid"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Text,
    Integer,
    Decimal,
    Float,
    DateTime,
    Boolean,
}

impl ColumnType {
    /// All supported types.
    pub const ALL: [ColumnType; 6] = [
        ColumnType::Text,
        ColumnType::Integer,
        ColumnType::Decimal,
        ColumnType::Float,
        ColumnType::DateTime,
        ColumnType::Boolean,
    ];

    /// Map a type name, case-insensitively and ignoring surrounding
    /// whitespace. Returns `None` for names outside the mapping table.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "string" | "text" => Some(ColumnType::Text),
            "int" | "integer" => Some(ColumnType::Integer),
            "decimal" | "money" => Some(ColumnType::Decimal),
            "float" | "double" => Some(ColumnType::Float),
            "datetime" | "date" => Some(ColumnType::DateTime),
            "bool" | "boolean" => Some(ColumnType::Boolean),
            _ => None,
        }
    }

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "string",
            ColumnType::Integer => "int",
            ColumnType::Decimal => "decimal",
            ColumnType::Float => "float",
            ColumnType::DateTime => "datetime",
            ColumnType::Boolean => "bool",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_the_same_type() {
        let pairs = [
            ("string", "text", ColumnType::Text),
            ("int", "integer", ColumnType::Integer),
            ("decimal", "money", ColumnType::Decimal),
            ("float", "double", ColumnType::Float),
            ("datetime", "date", ColumnType::DateTime),
            ("bool", "boolean", ColumnType::Boolean),
        ];
        for (a, b, expected) in pairs {
            assert_eq!(ColumnType::parse(a), Some(expected));
            assert_eq!(ColumnType::parse(b), Some(expected));
        }
    }

    #[test]
    fn parsing_ignores_case_and_padding() {
        assert_eq!(ColumnType::parse("  DateTime\t"), Some(ColumnType::DateTime));
        assert_eq!(ColumnType::parse("BOOLEAN"), Some(ColumnType::Boolean));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(ColumnType::parse("guid"), None);
        assert_eq!(ColumnType::parse(""), None);
    }

    #[test]
    fn canonical_names_parse_back() {
        for ty in ColumnType::ALL {
            assert_eq!(ColumnType::parse(ty.as_str()), Some(ty));
        }
    }
}
