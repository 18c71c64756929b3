//! Error types for Dataverse operations.
//!
//! This module provides a unified error type with explicit variants for
//! transport, protocol, input validation, provisioning and authentication
//! errors. Retry decisions are made on [`ErrorKind`] and HTTP status codes,
//! never on message text.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::record::format_key;

/// The unified error type for Dataverse operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or HTTP status failures. Potentially retryable.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with something that does not match the wire contract.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input rejected before (or without) a network call.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Table provisioning failures.
    #[error("provisioning error: {0}")]
    Provisioning(#[from] ProvisioningError),

    /// Credential collaborator failures.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A record operation failed; names the entity set and key it targeted.
    #[error("{entity_set}{}: {source}", .key.as_deref().map(format_key).unwrap_or_default())]
    Record {
        entity_set: String,
        key: Option<String>,
        source: Box<Error>,
    },
}

/// Machine-checkable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connection could not be established.
    Connection,
    /// Request timed out.
    Timeout,
    /// Non-success HTTP status.
    Status,
    /// The service does not (yet) know the table or object referenced.
    UnknownObject,
    /// Wire contract violation.
    Protocol,
    /// Local validation failure.
    InvalidInput,
    /// Table already exists.
    AlreadyExists,
    /// Table metadata not found.
    NotFound,
    /// Table accepted but derived names not yet resolvable.
    NotReady,
    /// Table never became ready within the polling budget.
    ReadinessTimeout,
    /// Token acquisition failed.
    Auth,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(TransportError::Connection { .. }) => ErrorKind::Connection,
            Error::Transport(TransportError::Timeout { .. }) => ErrorKind::Timeout,
            Error::Transport(TransportError::Http { .. }) => ErrorKind::Connection,
            Error::Transport(TransportError::Status(service)) => {
                if service.is_unknown_object() {
                    ErrorKind::UnknownObject
                } else {
                    ErrorKind::Status
                }
            }
            Error::Protocol(_) => ErrorKind::Protocol,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Provisioning(ProvisioningError::AlreadyExists { .. }) => ErrorKind::AlreadyExists,
            Error::Provisioning(ProvisioningError::NotFound { .. }) => ErrorKind::NotFound,
            Error::Provisioning(ProvisioningError::NotReady { .. }) => ErrorKind::NotReady,
            Error::Provisioning(ProvisioningError::ReadinessTimeout { .. }) => {
                ErrorKind::ReadinessTimeout
            }
            Error::Auth(_) => ErrorKind::Auth,
            Error::Record { source, .. } => source.kind(),
        }
    }

    /// Attach the entity set, and the key when there is one, of the record
    /// operation that failed.
    pub fn for_record(self, entity_set: &str, key: Option<&str>) -> Self {
        Error::Record {
            entity_set: entity_set.to_string(),
            key: key.map(|k| k.trim().to_string()),
            source: Box::new(self),
        }
    }

    /// Entity set of a failed record operation.
    pub fn entity_set(&self) -> Option<&str> {
        match self {
            Error::Record { entity_set, .. } => Some(entity_set),
            _ => None,
        }
    }

    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(TransportError::Status(service)) => Some(service.status),
            Error::Record { source, .. } => source.status(),
            _ => None,
        }
    }

    /// The service error payload, if this is a non-success HTTP response.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Error::Transport(TransportError::Status(service)) => Some(service),
            Error::Record { source, .. } => source.service_error(),
            _ => None,
        }
    }

    /// Whether the failure happened before a response was received.
    pub fn is_network(&self) -> bool {
        matches!(self.kind(), ErrorKind::Connection | ErrorKind::Timeout)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Protocol(ProtocolError::InvalidJson {
            message: err.to_string(),
        })
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP client error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The service answered with a non-success status.
    #[error("{0}")]
    Status(ServiceError),
}

/// A non-success response from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    /// HTTP status code.
    pub status: u16,
    /// Service error code (e.g. `0x80040217`), if present.
    pub code: Option<String>,
    /// Error message from the service.
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorEnvelope {
    error: ServiceErrorBody,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Message fragments the SQL endpoint uses for tables it cannot resolve yet.
const UNKNOWN_OBJECT_MARKERS: [&str; 2] = ["Invalid table name", "Invalid object name"];

impl ServiceError {
    /// Create a new service error.
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// Build from a status and the raw response body.
    ///
    /// Bodies that are not the service's `{"error": {...}}` shape leave
    /// code and message empty.
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ServiceErrorEnvelope>(body) {
            Ok(envelope) => Self::new(status, envelope.error.code, envelope.error.message),
            Err(_) => Self::new(status, None, None),
        }
    }

    /// Check if the service reported an unresolvable table or object name.
    pub fn is_unknown_object(&self) -> bool {
        self.message
            .as_deref()
            .is_some_and(|m| UNKNOWN_OBJECT_MARKERS.iter().any(|marker| m.contains(marker)))
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

/// Wire contract violations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A required field is absent from a response envelope.
    #[error("{endpoint} response missing '{field}'")]
    MissingField { endpoint: String, field: String },

    /// A response field has an unexpected JSON type.
    #[error("unexpected type for '{field}': {found}")]
    UnexpectedType { field: String, found: String },

    /// A response body could not be parsed as JSON.
    #[error("invalid JSON body: {message}")]
    InvalidJson { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid organization base URL.
    #[error("invalid organization URL '{value}': {reason}")]
    OrgUrl { value: String, reason: String },

    /// Invalid record identifier.
    #[error("invalid record id '{value}': {reason}")]
    RecordId { value: String, reason: String },

    /// Invalid table or schema name.
    #[error("invalid table name '{value}': {reason}")]
    SchemaName { value: String, reason: String },

    /// Column type not present in the type mapping table.
    #[error("unsupported column type '{type_name}' for '{column}'")]
    ColumnType { column: String, type_name: String },

    /// A column name that cannot become a distinct attribute.
    #[error("invalid column '{column}': {reason}")]
    Column { column: String, reason: String },

    /// A created record carries no identifier field.
    #[error("could not determine created record id from returned representation")]
    MissingRecordId,

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}

/// Table provisioning errors.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// The table already exists; nothing was created.
    #[error("table '{schema_name}' already exists")]
    AlreadyExists { schema_name: String },

    /// The table metadata could not be found.
    #[error("table '{schema_name}' not found")]
    NotFound { schema_name: String },

    /// The table was accepted but its derived names are not resolvable yet.
    #[error("table '{schema_name}' is not ready")]
    NotReady { schema_name: String },

    /// Polling exhausted its delay sequence before the table became ready.
    #[error("table '{schema_name}' not ready after {attempts} lookups")]
    ReadinessTimeout { schema_name: String, attempts: usize },
}

/// Credential errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential could not produce a token for the scope.
    #[error("failed to acquire token for '{scope}': {message}")]
    TokenAcquisition { scope: String, message: String },
}
