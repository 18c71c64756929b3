//! Transport trait and the request/response values it exchanges.

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ServiceError, TransportError};
use crate::{AccessToken, Result};

/// HTTP verbs used by the Web API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    /// Upper-case verb as it appears on a request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Serialized as JSON.
    Json(Value),
    /// Sent verbatim (used for multipart batches).
    Text(String),
}

/// A single HTTP request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Header names are unique (case-insensitively); see [`HttpRequest::header`].
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub bearer_token: Option<AccessToken>,
    pub body: Option<Body>,
}

impl HttpRequest {
    /// Create a request with no headers, query or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            bearer_token: None,
            body: None,
        }
    }

    /// Set a header, replacing any existing value with the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Attach a bearer token.
    pub fn bearer(mut self, token: AccessToken) -> Self {
        self.bearer_token = Some(token);
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, value: Value) -> Self {
        self.body = Some(Body::Json(value));
        self
    }

    /// Attach a raw text body.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Body::Text(body.into()));
        self
    }

    /// Look up a header value by name, case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body text of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-success status into [`TransportError::Status`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TransportError::Status(ServiceError::from_body(self.status, &self.body)).into())
        }
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Sends HTTP requests to the service.
///
/// Implementations return `Ok` for every response that arrived, whatever
/// its status; callers decide what a failure status means. Pooling and TLS
/// belong to the implementation, retries do not.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for its response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    #[test]
    fn header_replaces_existing_value() {
        let request = HttpRequest::new(Method::Post, "https://example.com")
            .header("Content-Type", "application/json")
            .header("content-type", "multipart/mixed; boundary=batch_1");
        assert_eq!(request.headers.len(), 1);
        assert_eq!(
            request.header_value("CONTENT-TYPE"),
            Some("multipart/mixed; boundary=batch_1")
        );
    }

    #[test]
    fn error_for_status_keeps_service_details() {
        let body = json!({"error": {"code": "0x80060888", "message": "Throttled"}}).to_string();
        let err = HttpResponse::new(429, body).error_for_status().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Status);
        assert_eq!(err.status(), Some(429));
        assert_eq!(
            err.service_error().and_then(|e| e.message.as_deref()),
            Some("Throttled")
        );
    }

    #[test]
    fn invalid_json_is_protocol_error() {
        let response = HttpResponse::new(200, "not json");
        let err = response.json::<Value>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }
}
