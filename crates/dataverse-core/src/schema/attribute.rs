//! Attribute definition payloads.

use serde::Serialize;

use super::{ColumnType, Label};

const DECIMAL_LIMIT: f64 = 100_000_000_000.0;
const TEXT_MAX_LENGTH: u32 = 200;

/// Wrapper the service uses for managed enum values: `{"Value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagedValue<T> {
    #[serde(rename = "Value")]
    pub value: T,
}

impl<T> ManagedValue<T> {
    fn of(value: T) -> Self {
        Self { value }
    }
}

/// Type-specific part of an attribute payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@odata.type")]
pub enum AttributeKind {
    #[serde(
        rename = "Microsoft.Dynamics.CRM.StringAttributeMetadata",
        rename_all = "PascalCase"
    )]
    String {
        max_length: u32,
        format_name: ManagedValue<&'static str>,
        is_primary_name: bool,
    },
    #[serde(
        rename = "Microsoft.Dynamics.CRM.IntegerAttributeMetadata",
        rename_all = "PascalCase"
    )]
    Integer {
        format: &'static str,
        min_value: i32,
        max_value: i32,
    },
    #[serde(
        rename = "Microsoft.Dynamics.CRM.DecimalAttributeMetadata",
        rename_all = "PascalCase"
    )]
    Decimal {
        min_value: f64,
        max_value: f64,
        precision: u32,
    },
    #[serde(
        rename = "Microsoft.Dynamics.CRM.DoubleAttributeMetadata",
        rename_all = "PascalCase"
    )]
    Double {
        min_value: f64,
        max_value: f64,
        precision: u32,
    },
    #[serde(
        rename = "Microsoft.Dynamics.CRM.DateTimeAttributeMetadata",
        rename_all = "PascalCase"
    )]
    DateTime {
        format: &'static str,
        ime_mode: &'static str,
    },
    #[serde(
        rename = "Microsoft.Dynamics.CRM.BooleanAttributeMetadata",
        rename_all = "PascalCase"
    )]
    Boolean { option_set: BooleanOptionSet },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BooleanOptionSet {
    #[serde(rename = "@odata.type")]
    odata_type: &'static str,
    true_option: BooleanOption,
    false_option: BooleanOption,
    is_global: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BooleanOption {
    value: u8,
    label: Label,
}

impl AttributeKind {
    fn for_type(column_type: ColumnType, language_code: u32) -> Self {
        match column_type {
            ColumnType::Text => AttributeKind::String {
                max_length: TEXT_MAX_LENGTH,
                format_name: ManagedValue::of("Text"),
                is_primary_name: false,
            },
            ColumnType::Integer => AttributeKind::Integer {
                format: "None",
                min_value: i32::MIN,
                max_value: i32::MAX,
            },
            ColumnType::Decimal => AttributeKind::Decimal {
                min_value: -DECIMAL_LIMIT,
                max_value: DECIMAL_LIMIT,
                precision: 2,
            },
            ColumnType::Float => AttributeKind::Double {
                min_value: -DECIMAL_LIMIT,
                max_value: DECIMAL_LIMIT,
                precision: 2,
            },
            ColumnType::DateTime => AttributeKind::DateTime {
                format: "DateOnly",
                ime_mode: "Inactive",
            },
            ColumnType::Boolean => AttributeKind::Boolean {
                option_set: BooleanOptionSet {
                    odata_type: "Microsoft.Dynamics.CRM.BooleanOptionSetMetadata",
                    true_option: BooleanOption {
                        value: 1,
                        label: Label::new("True", language_code),
                    },
                    false_option: BooleanOption {
                        value: 0,
                        label: Label::new("False", language_code),
                    },
                    is_global: false,
                },
            },
        }
    }
}

/// One attribute in an entity create payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeMetadata {
    #[serde(flatten)]
    pub kind: AttributeKind,
    pub schema_name: String,
    pub display_name: Label,
    pub required_level: ManagedValue<&'static str>,
}

impl AttributeMetadata {
    /// Payload for a column of the given type.
    ///
    /// The display label is the last `_` segment of the schema name.
    pub fn new(schema_name: impl Into<String>, column_type: ColumnType, language_code: u32) -> Self {
        let schema_name = schema_name.into();
        let label = schema_name.rsplit('_').next().unwrap_or_default().to_string();
        Self {
            kind: AttributeKind::for_type(column_type, language_code),
            display_name: Label::new(label, language_code),
            schema_name,
            required_level: ManagedValue::of("None"),
        }
    }

    /// Payload for the primary name attribute.
    pub fn primary_name(schema_name: impl Into<String>, language_code: u32) -> Self {
        let mut attribute = Self::new(schema_name, ColumnType::Text, language_code);
        if let AttributeKind::String {
            is_primary_name, ..
        } = &mut attribute.kind
        {
            *is_primary_name = true;
        }
        attribute
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn label(text: &str) -> Value {
        json!({
            "@odata.type": "Microsoft.Dynamics.CRM.Label",
            "LocalizedLabels": [{
                "@odata.type": "Microsoft.Dynamics.CRM.LocalizedLabel",
                "Label": text,
                "LanguageCode": 1033
            }]
        })
    }

    fn payload(attribute: &AttributeMetadata) -> Value {
        serde_json::to_value(attribute).unwrap()
    }

    #[test]
    fn primary_name_attribute() {
        let attr = AttributeMetadata::primary_name("new_Name", 1033);
        assert_eq!(
            payload(&attr),
            json!({
                "@odata.type": "Microsoft.Dynamics.CRM.StringAttributeMetadata",
                "MaxLength": 200,
                "FormatName": {"Value": "Text"},
                "IsPrimaryName": true,
                "SchemaName": "new_Name",
                "DisplayName": label("Name"),
                "RequiredLevel": {"Value": "None"}
            })
        );
    }

    #[test]
    fn integer_attribute_spans_i32() {
        let value = payload(&AttributeMetadata::new("new_Quantity", ColumnType::Integer, 1033));
        assert_eq!(value["@odata.type"], "Microsoft.Dynamics.CRM.IntegerAttributeMetadata");
        assert_eq!(value["Format"], "None");
        assert_eq!(value["MinValue"], -2147483648i64);
        assert_eq!(value["MaxValue"], 2147483647i64);
        assert_eq!(value["DisplayName"], label("Quantity"));
    }

    #[test]
    fn decimal_and_double_share_limits() {
        for (ty, odata) in [
            (ColumnType::Decimal, "Microsoft.Dynamics.CRM.DecimalAttributeMetadata"),
            (ColumnType::Float, "Microsoft.Dynamics.CRM.DoubleAttributeMetadata"),
        ] {
            let value = payload(&AttributeMetadata::new("new_Amount", ty, 1033));
            assert_eq!(value["@odata.type"], odata);
            assert_eq!(value["MinValue"], -100000000000.0);
            assert_eq!(value["MaxValue"], 100000000000.0);
            assert_eq!(value["Precision"], 2);
        }
    }

    #[test]
    fn datetime_is_date_only() {
        let value = payload(&AttributeMetadata::new("new_DueDate", ColumnType::DateTime, 1033));
        assert_eq!(value["Format"], "DateOnly");
        assert_eq!(value["ImeMode"], "Inactive");
    }

    #[test]
    fn boolean_option_set() {
        let value = payload(&AttributeMetadata::new("new_Active", ColumnType::Boolean, 1033));
        assert_eq!(
            value["OptionSet"],
            json!({
                "@odata.type": "Microsoft.Dynamics.CRM.BooleanOptionSetMetadata",
                "TrueOption": {"Value": 1, "Label": label("True")},
                "FalseOption": {"Value": 0, "Label": label("False")},
                "IsGlobal": false
            })
        );
    }
}
