//! Mock transport for testing
//!
//! Returns queued results in order and records every request it receives.

use super::{ChatRequest, ChatResponse, ChatTransport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<ChatResponse, TransportError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful answer
    pub fn queue_answer(&self, answer: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(ChatResponse {
            answer: Some(answer.into()),
        }));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("No mock response queued")))
    }
}
