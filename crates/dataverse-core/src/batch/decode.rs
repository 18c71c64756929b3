//! `$batch` response decoding.

use serde_json::Value;
use tracing::{debug, trace};

use super::multipart::{self, Part};
use crate::Record;

/// Changesets nest one level inside the batch.
const MAX_NESTING: usize = 2;

const HTTP_MARKER: &str = "HTTP/1.1 ";

/// What happened to one changeset member.
#[derive(Debug, Clone, PartialEq)]
pub enum PartOutcome {
    /// `201` with a JSON object body.
    Parsed(Record),
    /// Any other status.
    Failed { status: u16 },
    /// `201`, but the status line or body could not be read.
    Unparseable,
    /// The response had fewer parts than the request.
    Missing,
}

impl PartOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, PartOutcome::Parsed(_))
    }

    pub fn into_record(self) -> Option<Record> {
        match self {
            PartOutcome::Parsed(record) => Some(record),
            _ => None,
        }
    }
}

/// Per-item outcomes of a batch, aligned with the request order.
///
/// # Example
///
/// ```
/// use dataverse_core::batch::{BatchResponse, PartOutcome};
///
/// let response = BatchResponse::decode("", 2);
/// assert_eq!(response.outcomes(), &[PartOutcome::Missing, PartOutcome::Missing]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResponse {
    outcomes: Vec<PartOutcome>,
}

impl BatchResponse {
    /// Decode a batch response body for a request of `expected` items.
    ///
    /// The result always has exactly `expected` outcomes: surplus parts are
    /// dropped and absent ones become [`PartOutcome::Missing`]. Text without
    /// multipart framing is scanned for `HTTP/1.1` status lines instead.
    pub fn decode(text: &str, expected: usize) -> Self {
        let mut outcomes = match multipart::detect_boundary(text) {
            Some(boundary) => decode_multipart(text, boundary, 0),
            None => Vec::new(),
        };
        if outcomes.is_empty() {
            outcomes = decode_markers(text);
        }

        let found = outcomes.len();
        outcomes.truncate(expected);
        outcomes.resize_with(expected, || PartOutcome::Missing);

        debug!(
            expected,
            found,
            parsed = outcomes.iter().filter(|o| o.is_parsed()).count(),
            "decoded batch response"
        );
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[PartOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Created records in request order, `None` where an item failed.
    pub fn into_records(self) -> Vec<Option<Record>> {
        self.outcomes
            .into_iter()
            .map(PartOutcome::into_record)
            .collect()
    }
}

fn decode_multipart(text: &str, boundary: &str, depth: usize) -> Vec<PartOutcome> {
    let mut outcomes = Vec::new();
    for raw in multipart::split_parts(text, boundary) {
        if raw.trim_start().starts_with("HTTP/") {
            outcomes.push(decode_http(raw));
            continue;
        }

        let part = Part::parse(raw);
        let content_type = part.content_type().unwrap_or_default();
        if content_type
            .to_ascii_lowercase()
            .starts_with("multipart/mixed")
        {
            if depth + 1 >= MAX_NESTING {
                trace!(depth, "ignoring deeply nested multipart");
                continue;
            }
            let nested = multipart::boundary_param(content_type)
                .or_else(|| multipart::detect_boundary(part.body));
            if let Some(nested) = nested {
                outcomes.extend(decode_multipart(part.body, nested, depth + 1));
            }
        } else if part.body.trim_start().starts_with("HTTP/") {
            outcomes.push(decode_http(part.body));
        } else {
            outcomes.push(PartOutcome::Unparseable);
        }
    }
    outcomes
}

/// Decode an embedded HTTP response: status line, headers, JSON body.
fn decode_http(text: &str) -> PartOutcome {
    let text = text.trim_start();
    let (status_line, rest) = text.split_once('\n').unwrap_or((text, ""));
    let Some(status) = parse_status(status_line) else {
        return PartOutcome::Unparseable;
    };
    if status != 201 {
        return PartOutcome::Failed { status };
    }
    let (_, body) = multipart::split_head(rest);
    parse_record(body)
}

/// Status code following an `HTTP/x.y` token.
fn parse_status(line: &str) -> Option<u16> {
    let mut tokens = line.split_whitespace();
    tokens.next().filter(|t| t.starts_with("HTTP/"))?;
    tokens.next()?.parse().ok()
}

/// Fallback for unframed text: one outcome per `HTTP/1.1 ` marker.
fn decode_markers(text: &str) -> Vec<PartOutcome> {
    text.split(HTTP_MARKER)
        .skip(1)
        .map(|segment| {
            let status = segment
                .split_whitespace()
                .next()
                .and_then(|code| code.parse::<u16>().ok());
            match status {
                Some(201) => {}
                Some(status) => return PartOutcome::Failed { status },
                None => return PartOutcome::Unparseable,
            }
            let Some(start) = segment.find('{') else {
                return PartOutcome::Unparseable;
            };
            let tail = &segment[start..];
            let json = match tail.find("}\r\n--") {
                Some(end) => &tail[..=end],
                None => tail,
            };
            parse_record(json)
        })
        .collect()
}

fn parse_record(body: &str) -> PartOutcome {
    match serde_json::from_str::<Value>(body.trim()) {
        Ok(Value::Object(record)) => PartOutcome::Parsed(record),
        _ => PartOutcome::Unparseable,
    }
}
