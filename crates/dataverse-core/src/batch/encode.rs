//! `$batch` request encoding.

use std::fmt;

use serde_json::Value;
use uuid::Uuid;

use crate::Record;
use crate::traits::Method;

const CRLF: &str = "\r\n";

/// Header asking the service to echo the created entity back.
pub const PREFER_REPRESENTATION: &str = "return=representation";

/// A multipart boundary token, `<kind>_<uuid>`.
///
/// Only constructible from a UUID, so a boundary can never contain
/// characters that would break the framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    kind: &'static str,
    id: Uuid,
}

impl Boundary {
    pub fn batch(id: Uuid) -> Self {
        Self { kind: "batch", id }
    }

    pub fn changeset(id: Uuid) -> Self {
        Self {
            kind: "changeset",
            id,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Line that opens a part: `--<boundary>`.
    pub fn delimiter(&self) -> String {
        format!("--{}", self)
    }

    /// Line that closes the multipart body: `--<boundary>--`.
    pub fn close_delimiter(&self) -> String {
        format!("--{}--", self)
    }

    /// `multipart/mixed` content type announcing this boundary.
    pub fn content_type(&self) -> String {
        format!("multipart/mixed; boundary={}", self)
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind, self.id)
    }
}

/// One write inside a changeset.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangesetItem {
    pub collection: String,
    pub method: Method,
    pub body: Value,
}

impl ChangesetItem {
    /// A create (POST) of `record` into `collection`.
    pub fn create(collection: impl Into<String>, record: Record) -> Self {
        Self {
            collection: collection.into(),
            method: Method::Post,
            body: Value::Object(record),
        }
    }
}

/// An ordered set of writes sent as one atomic changeset.
///
/// Position matters: the n-th response part belongs to the n-th item.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    api_url: String,
    items: Vec<ChangesetItem>,
}

/// Wire form of a [`BatchRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBatch {
    /// Value for the outer request's `Content-Type` header.
    pub content_type: String,
    /// Multipart body.
    pub body: String,
    pub batch: Boundary,
    pub changeset: Boundary,
}

impl BatchRequest {
    /// An empty batch against the given Web API root.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            items: Vec::new(),
        }
    }

    /// A batch creating each record in `collection`, in order.
    pub fn create(api_url: impl Into<String>, collection: &str, records: &[Record]) -> Self {
        let mut batch = Self::new(api_url);
        for record in records {
            batch.push(ChangesetItem::create(collection, record.clone()));
        }
        batch
    }

    pub fn push(&mut self, item: ChangesetItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[ChangesetItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// URL the encoded batch is posted to.
    pub fn endpoint(&self) -> String {
        format!("{}/$batch", self.api_url)
    }

    /// Encode with freshly generated boundaries.
    pub fn encode(&self) -> EncodedBatch {
        self.encode_with(Uuid::new_v4(), Uuid::new_v4())
    }

    /// Encode with the given batch and changeset ids.
    pub fn encode_with(&self, batch_id: Uuid, changeset_id: Uuid) -> EncodedBatch {
        let batch = Boundary::batch(batch_id);
        let changeset = Boundary::changeset(changeset_id);

        let mut lines: Vec<String> = vec![
            batch.delimiter(),
            format!("Content-Type: {}", changeset.content_type()),
            String::new(),
        ];

        for (index, item) in self.items.iter().enumerate() {
            lines.push(changeset.delimiter());
            lines.push("Content-Type: application/http".to_string());
            lines.push("Content-Transfer-Encoding: binary".to_string());
            lines.push(format!("Content-ID: {}", index + 1));
            lines.push(String::new());
            lines.push(format!(
                "{} {}/{} HTTP/1.1",
                item.method, self.api_url, item.collection
            ));
            lines.push("Content-Type: application/json".to_string());
            lines.push(format!("Prefer: {}", PREFER_REPRESENTATION));
            lines.push(String::new());
            lines.push(item.body.to_string());
            lines.push(String::new());
        }

        lines.push(changeset.close_delimiter());
        lines.push(String::new());
        lines.push(batch.close_delimiter());

        EncodedBatch {
            content_type: batch.content_type(),
            body: lines.join(CRLF),
            batch,
            changeset,
        }
    }
}
