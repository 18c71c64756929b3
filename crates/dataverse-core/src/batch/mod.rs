//! OData `$batch` codec.
//!
//! Many creates travel as one `multipart/mixed` request holding a single
//! changeset, so the service applies them atomically. The response is
//! decoded back into one outcome per request item, in request order.

mod decode;
mod encode;
mod multipart;

pub use decode::{BatchResponse, PartOutcome};
pub use encode::{BatchRequest, Boundary, ChangesetItem, EncodedBatch, PREFER_REPRESENTATION};

/// Maximum number of creates per `$batch` request.
pub const BATCH_SIZE: usize = 25;
