//! Chat transport boundary
//!
//! The network layer lives outside this crate. It only has to implement
//! [`ChatTransport`]; the helpers here turn its result into a bot message.

#[cfg(test)]
pub mod testing;

use crate::message::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Bot text used when the backend answers without an `answer`
pub const EMPTY_ANSWER_TEXT: &str = "Sorry, I couldn’t process your request.";

/// Body of a chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

/// Body of a successful chat response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

/// Transport error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Network, message)
    }

    pub fn status(code: u16) -> Self {
        Self::new(TransportErrorKind::Status(code), format!("HTTP error! status: {code}"))
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Decode, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection failed or timed out
    Network,
    /// Backend answered with a non-success status
    Status(u16),
    /// Response body was not a chat response
    Decode,
}

/// Sends one user query to the backend
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Logging wrapper for chat transports
pub struct LoggingTransport<T> {
    inner: T,
}

impl<T: ChatTransport> LoggingTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T: ChatTransport> ChatTransport for LoggingTransport<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let start = std::time::Instant::now();
        let result = self.inner.send(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    duration_ms = %duration.as_millis(),
                    query_len = request.query.len(),
                    has_answer = response.answer.is_some(),
                    "Chat request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "Chat request failed"
                );
            }
        }

        result
    }
}

/// Turn a transport result into the bot turn that answers it.
///
/// Failures become an error turn with a fixed apology; a response without an
/// answer becomes a short bot apology that still goes through the parser.
pub fn bot_reply(result: Result<ChatResponse, TransportError>) -> Message {
    match result {
        Ok(response) => {
            let answer = response
                .answer
                .filter(|answer| !answer.is_empty())
                .unwrap_or_else(|| EMPTY_ANSWER_TEXT.to_string());
            Message::bot(answer)
        }
        Err(e) => {
            tracing::warn!(error = %e, kind = ?e.kind, "Chat request failed");
            Message::transport_failure()
        }
    }
}
