//! Web API paths, headers and envelope types.

use serde::{Deserialize, Serialize};

/// Entity metadata collection.
pub const ENTITY_DEFINITIONS: &str = "EntityDefinitions";

/// Batch endpoint.
pub const BATCH: &str = "$batch";

/// Envelope key of the SQL procedure's response.
pub const QUERY_RESULT: &str = "queryresult";

/// Filter for lookups that exclude private tables.
pub const PUBLIC_TABLES_FILTER: &str = "IsPrivate eq false";

pub const HEADER_ACCEPT: &str = "Accept";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_ODATA_MAX_VERSION: &str = "OData-MaxVersion";
pub const HEADER_ODATA_VERSION: &str = "OData-Version";
pub const HEADER_PREFER: &str = "Prefer";
pub const HEADER_IF_MATCH: &str = "If-Match";

pub const APPLICATION_JSON: &str = "application/json";
pub const ODATA_VERSION: &str = "4.0";

/// `If-Match` value that overwrites regardless of the current version.
pub const MATCH_ANY: &str = "*";

/// `{"value": [...]}` collection envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ODataList<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// Request body for the SQL procedure.
#[derive(Debug, Serialize)]
pub(crate) struct SqlQueryRequest<'a> {
    pub querytext: &'a str,
}
