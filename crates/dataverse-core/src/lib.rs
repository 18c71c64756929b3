//! dataverse-core - Core types, codecs and traits for the Dataverse Web API.
//!
//! This crate holds everything that does not need an HTTP stack: validated
//! identifiers, the unified error type, client configuration, the retry
//! policy, the `$batch` multipart codec and the column type mapping used
//! when provisioning tables.
//!
//! # Example
//!
//! ```
//! use dataverse_core::batch::{BatchRequest, BatchResponse};
//! use dataverse_core::Record;
//! use serde_json::json;
//!
//! let mut record = Record::new();
//! record.insert("new_name".to_string(), json!("Sample A"));
//!
//! let request = BatchRequest::create(
//!     "https://contoso.crm.dynamics.com/api/data/v9.2",
//!     "new_sampleitems",
//!     &[record],
//! );
//! let encoded = request.encode();
//! assert!(encoded.content_type.starts_with("multipart/mixed; boundary=batch_"));
//!
//! // An empty response still yields one (missing) slot per request item.
//! let response = BatchResponse::decode("", request.len());
//! assert_eq!(response.into_records(), vec![None]);
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod record;
pub mod retry;
pub mod schema;
pub mod tokens;
pub mod traits;
pub mod types;

pub use config::ClientConfig;
pub use error::{Error, ErrorKind};
pub use record::{Record, extract_id};
pub use retry::RetryPolicy;
pub use tokens::AccessToken;
pub use traits::{StaticTokenCredential, TabularSource, TokenCredential, Transport};
pub use types::{OrgUrl, RecordId, SchemaName};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
