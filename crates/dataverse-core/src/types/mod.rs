//! Core Dataverse types.
//!
//! These types enforce service invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod org_url;
mod record_id;
mod schema_name;

pub use org_url::OrgUrl;
pub use record_id::RecordId;
pub use schema_name::{DEFAULT_PUBLISHER, SchemaName, to_pascal};
