//! Table provisioning model and the column type mapping table.

mod attribute;
mod column_type;
mod entity;
mod label;

pub use attribute::{AttributeKind, AttributeMetadata, BooleanOption, BooleanOptionSet, ManagedValue};
pub use column_type::ColumnType;
pub use entity::{
    ColumnDefinition, ENTITY_SELECT, EntityDefinition, EntityMetadata, ProvisioningState,
    TableDefinition, TableInfo, TableStatus,
};
pub use label::{Label, LocalizedLabel};
