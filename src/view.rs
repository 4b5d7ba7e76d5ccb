//! Render-ready projection of the conversation
//!
//! Snapshots are the only data handed to the rendering layer. They carry what
//! is visible right now and never expose reveal cursors.

use crate::message::{Message, MessageId, MessageKind, Sender};
use crate::parser::Section;
use crate::reveal::RevealState;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What a message shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SnapshotBody {
    /// Literal text, used for user turns and transport failures
    Text { text: String },
    /// Parsed bot answer, partially or fully revealed
    Structured { intro: String, sections: Vec<Section> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub id: MessageId,
    pub sender: Sender,
    pub body: SnapshotBody,
    pub is_typing: bool,
    pub is_error: bool,
    pub timestamp: DateTime<Utc>,
}

/// Everything the render layer needs for one redraw
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub messages: Vec<Snapshot>,
    /// A request is outstanding; input should be suppressed
    pub is_loading: bool,
}

impl Frame {
    /// Some message is still being revealed
    pub fn is_animating(&self) -> bool {
        self.messages.iter().any(|snapshot| snapshot.is_typing)
    }
}

pub fn snapshot(message: &Message, state: &RevealState) -> Snapshot {
    let body = match &message.kind {
        MessageKind::User { text } | MessageKind::Error { text } => {
            SnapshotBody::Text { text: text.clone() }
        }
        MessageKind::Bot { .. } => {
            let revealed = state.revealed();
            SnapshotBody::Structured {
                intro: revealed.intro,
                sections: revealed.sections,
            }
        }
    };

    Snapshot {
        id: message.id,
        sender: message.sender(),
        body,
        is_typing: !state.is_done(),
        is_error: message.is_error(),
        timestamp: message.timestamp,
    }
}

/// Project `(message, state)` pairs into snapshots, keeping their order
pub fn project<'a>(
    pairs: impl IntoIterator<Item = (&'a Message, &'a RevealState)>,
) -> Vec<Snapshot> {
    pairs
        .into_iter()
        .map(|(message, state)| snapshot(message, state))
        .collect()
}
