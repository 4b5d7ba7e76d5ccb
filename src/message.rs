//! Chat message types
//!
//! A message is one chat turn. User turns carry literal text, bot turns carry
//! the raw response text that is parsed and revealed, and error turns carry a
//! fixed apology that is shown as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Display text for a bot turn that stands in for a transport failure
pub const TRANSPORT_FAILURE_TEXT: &str = "Oops, something went wrong. Please try again later.";

/// Stable identity of a message within a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// Turn payload. Which text field is meaningful follows from the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageKind {
    User { text: String },
    Bot { raw_text: String },
    /// Synthetic bot turn injected when the transport fails
    Error { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: MessageKind,
}

impl Message {
    fn new(kind: MessageKind) -> Self {
        Self {
            id: MessageId::new(),
            timestamp: Utc::now(),
            kind,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageKind::User { text: text.into() })
    }

    pub fn bot(raw_text: impl Into<String>) -> Self {
        Self::new(MessageKind::Bot {
            raw_text: raw_text.into(),
        })
    }

    pub fn transport_failure() -> Self {
        Self::new(MessageKind::Error {
            text: TRANSPORT_FAILURE_TEXT.to_string(),
        })
    }

    pub fn sender(&self) -> Sender {
        match self.kind {
            MessageKind::User { .. } => Sender::User,
            MessageKind::Bot { .. } | MessageKind::Error { .. } => Sender::Bot,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, MessageKind::Error { .. })
    }

    /// Raw response text, only for bot turns that go through the parser
    pub fn raw_text(&self) -> Option<&str> {
        match &self.kind {
            MessageKind::Bot { raw_text } => Some(raw_text),
            _ => None,
        }
    }
}
