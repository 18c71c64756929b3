//! Scripted transport for unit tests that need paused time.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use dataverse_core::Result;
use dataverse_core::error::TransportError;
use dataverse_core::traits::{HttpRequest, HttpResponse, Transport};

enum Step {
    Respond(HttpResponse),
    Disconnect,
}

/// Replays canned responses in order and records every request.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    steps: Arc<Mutex<VecDeque<Step>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: HttpResponse) -> Self {
        self.steps.lock().unwrap().push_back(Step::Respond(response));
        self
    }

    pub fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
        self.respond(HttpResponse::new(status, body.to_string()))
    }

    pub fn disconnect(self) -> Self {
        self.steps.lock().unwrap().push_back(Step::Disconnect);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Respond(response)) => Ok(response),
            Some(Step::Disconnect) => Err(TransportError::Connection {
                message: "connection reset".to_string(),
            }
            .into()),
            None => Err(TransportError::Connection {
                message: "no scripted response left".to_string(),
            }
            .into()),
        }
    }
}
