//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{instrument, trace};

use dataverse_core::error::TransportError;
use dataverse_core::traits::{Body, HttpRequest, HttpResponse, Method, Transport};
use dataverse_core::{Error, Result};

/// HTTP transport over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("dataverse-webapi/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client, timeout })
    }

    fn map_error(&self, err: reqwest::Error) -> Error {
        transport_error(err, self.timeout)
    }
}

/// Classify a reqwest failure.
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: timeout.as_millis() as u64,
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(reqwest_method(request.method), &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token.secret());
        }
        builder = match request.body {
            Some(Body::Json(value)) => builder.json(&value),
            Some(Body::Text(text)) => builder.body(text),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;
        trace!(status, bytes = body.len(), "response received");

        Ok(HttpResponse::new(status, body))
    }
}
