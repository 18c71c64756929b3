//! Table definitions, entity payloads and provisioning states.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AttributeMetadata, ColumnType, Label};
use crate::error::InvalidInputError;
use crate::types::to_pascal;
use crate::{Result, SchemaName};

/// Fields requested when looking up an entity definition.
pub const ENTITY_SELECT: &str = "MetadataId,LogicalName,SchemaName,EntitySetName";

/// A column requested for a new table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Name as given by the caller.
    pub name: String,
    /// `<prefix>_<PascalName>`.
    pub schema_name: String,
    pub column_type: ColumnType,
}

/// A validated request to create a table.
///
/// Construction maps every column type, so an unsupported type is rejected
/// before anything is sent.
///
/// # Example
///
/// ```
/// use dataverse_core::schema::TableDefinition;
///
/// let table = TableDefinition::new("SampleItem", [("code", "string"), ("amount", "decimal")], 1033).unwrap();
/// assert_eq!(table.schema_name().as_str(), "new_SampleItem");
/// assert_eq!(table.columns_created(), vec!["new_Code", "new_Amount"]);
///
/// assert!(TableDefinition::new("SampleItem", [("id", "uuid")], 1033).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    display_name: String,
    schema_name: SchemaName,
    columns: Vec<ColumnDefinition>,
    language_code: u32,
}

impl TableDefinition {
    pub fn new<I, N, T>(table_name: &str, columns: I, language_code: u32) -> Result<Self>
    where
        I: IntoIterator<Item = (N, T)>,
        N: AsRef<str>,
        T: AsRef<str>,
    {
        let schema_name = SchemaName::from_table_name(table_name)?;
        let columns = columns
            .into_iter()
            .map(|(name, type_name)| -> Result<ColumnDefinition> {
                let name = name.as_ref();
                let column_type = ColumnType::parse(type_name.as_ref()).ok_or_else(|| {
                    InvalidInputError::ColumnType {
                        column: name.to_string(),
                        type_name: type_name.as_ref().to_string(),
                    }
                })?;
                Ok(ColumnDefinition {
                    name: name.to_string(),
                    schema_name: schema_name.attribute(name),
                    column_type,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        check_column_names(&schema_name, &columns)?;

        Ok(Self {
            display_name: table_name.trim().to_string(),
            schema_name,
            columns,
            language_code,
        })
    }

    pub fn schema_name(&self) -> &SchemaName {
        &self.schema_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// Schema names of the requested columns, in input order.
    pub fn columns_created(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.schema_name.clone()).collect()
    }

    /// Attribute payloads with the primary name attribute first.
    pub fn attributes(&self) -> Vec<AttributeMetadata> {
        let primary = AttributeMetadata::primary_name(
            self.schema_name.primary_name_attribute(),
            self.language_code,
        );
        std::iter::once(primary)
            .chain(self.columns.iter().map(|c| {
                AttributeMetadata::new(c.schema_name.clone(), c.column_type, self.language_code)
            }))
            .collect()
    }

    /// Body for `POST EntityDefinitions`.
    pub fn to_entity_metadata(&self) -> EntityMetadata {
        let lang = self.language_code;
        EntityMetadata {
            odata_type: "Microsoft.Dynamics.CRM.EntityMetadata",
            schema_name: self.schema_name.to_string(),
            display_name: Label::new(self.display_name.clone(), lang),
            display_collection_name: Label::new(format!("{}s", self.display_name), lang),
            description: Label::new(format!("Custom entity for {}", self.display_name), lang),
            ownership_type: "UserOwned",
            has_activities: false,
            has_notes: true,
            is_activity: false,
            attributes: self.attributes(),
        }
    }
}

/// Entity create payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityMetadata {
    #[serde(rename = "@odata.type")]
    odata_type: &'static str,
    schema_name: String,
    display_name: Label,
    display_collection_name: Label,
    description: Label,
    ownership_type: &'static str,
    has_activities: bool,
    has_notes: bool,
    is_activity: bool,
    attributes: Vec<AttributeMetadata>,
}

impl EntityMetadata {
    pub fn attributes(&self) -> &[AttributeMetadata] {
        &self.attributes
    }
}

/// Attribute names must be non-empty and unique, case-insensitively, and
/// must not take the primary name attribute.
fn check_column_names(schema_name: &SchemaName, columns: &[ColumnDefinition]) -> Result<()> {
    let primary = schema_name.primary_name_attribute();
    let mut seen = HashSet::from([primary.to_ascii_lowercase()]);

    for column in columns {
        let reason = if to_pascal(&column.name).is_empty() {
            "name has no letters or digits".to_string()
        } else if column.schema_name.eq_ignore_ascii_case(&primary) {
            format!("clashes with the primary name attribute '{}'", primary)
        } else if !seen.insert(column.schema_name.to_ascii_lowercase()) {
            format!("maps to '{}' more than once", column.schema_name)
        } else {
            continue;
        };

        return Err(InvalidInputError::Column {
            column: column.name.clone(),
            reason,
        }
        .into());
    }
    Ok(())
}

/// An entity definition as returned by a metadata lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EntityDefinition {
    pub metadata_id: Option<String>,
    pub logical_name: Option<String>,
    pub schema_name: Option<String>,
    pub entity_set_name: Option<String>,
}

impl EntityDefinition {
    /// Both derived names are resolvable.
    pub fn is_ready(&self) -> bool {
        has_value(&self.logical_name) && has_value(&self.entity_set_name)
    }
}

fn has_value(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

/// A queryable table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub schema_name: String,
    pub logical_name: String,
    pub entity_set_name: String,
    pub metadata_id: String,
    /// Column schema names created with the table; empty for lookups.
    pub columns_created: Vec<String>,
}

impl TableInfo {
    /// Build from a ready definition; `None` if any derived name is missing.
    pub fn from_definition(schema_name: &SchemaName, entity: &EntityDefinition) -> Option<Self> {
        if !entity.is_ready() {
            return None;
        }
        Some(Self {
            schema_name: entity
                .schema_name
                .clone()
                .unwrap_or_else(|| schema_name.to_string()),
            logical_name: entity.logical_name.clone()?,
            entity_set_name: entity.entity_set_name.clone()?,
            metadata_id: entity.metadata_id.clone().filter(|s| !s.is_empty())?,
            columns_created: Vec::new(),
        })
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns_created = columns;
        self
    }
}

/// What a lookup reveals about a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    /// No definition with this schema name.
    Absent,
    /// Accepted, derived names not yet resolvable.
    Pending(EntityDefinition),
    /// Fully resolvable.
    Ready(TableInfo),
}

impl TableStatus {
    /// Classify a lookup result.
    pub fn from_lookup(schema_name: &SchemaName, entity: Option<EntityDefinition>) -> Self {
        match entity {
            None => TableStatus::Absent,
            Some(entity) => match TableInfo::from_definition(schema_name, &entity) {
                Some(info) => TableStatus::Ready(info),
                None => TableStatus::Pending(entity),
            },
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, TableStatus::Absent)
    }
}

/// Lifecycle of a table create call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningState {
    Absent,
    Creating,
    PollingForReadiness,
    Ready,
    Failed,
}

impl ProvisioningState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProvisioningState::Absent => "absent",
            ProvisioningState::Creating => "creating",
            ProvisioningState::PollingForReadiness => "polling",
            ProvisioningState::Ready => "ready",
            ProvisioningState::Failed => "failed",
        }
    }

    /// Whether the state machine allows moving to `next`.
    pub fn can_transition_to(&self, next: ProvisioningState) -> bool {
        use ProvisioningState::*;
        matches!(
            (self, next),
            (Absent, Creating)
                | (Creating, PollingForReadiness)
                | (Creating, Failed)
                | (PollingForReadiness, Ready)
                | (PollingForReadiness, Failed)
        )
    }
}

impl fmt::Display for ProvisioningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
