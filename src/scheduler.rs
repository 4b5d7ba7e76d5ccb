//! Animation scheduler
//!
//! Owns the reveal state of every message in the current conversation and
//! decides which one animates. Only the first unfinished message advances,
//! one character per tick, so messages are revealed strictly in list order.

use crate::message::{Message, MessageKind};
use crate::parser::{parse, StructuredResponse};
use crate::reveal::{advance, RevealState};
use crate::view::{project, Snapshot};

/// A message with its reveal progress
#[derive(Debug, Clone)]
pub struct Entry {
    pub message: Message,
    pub state: RevealState,
}

impl Entry {
    /// Entry for a message that arrived while the conversation is open
    fn arriving(message: Message) -> Self {
        let state = match &message.kind {
            MessageKind::Bot { raw_text } => RevealState::new(parse(raw_text)),
            MessageKind::User { text } | MessageKind::Error { text } => {
                RevealState::finished(StructuredResponse::plain(text.as_str()))
            }
        };
        Self { message, state }
    }

    /// Entry for a message from a stored conversation, shown without replay
    fn historical(message: Message) -> Self {
        let target = match &message.kind {
            MessageKind::Bot { raw_text } => parse(raw_text),
            MessageKind::User { text } | MessageKind::Error { text } => {
                StructuredResponse::plain(text.as_str())
            }
        };
        Self {
            message,
            state: RevealState::finished(target),
        }
    }
}

#[derive(Debug, Default)]
pub struct AnimationScheduler {
    entries: Vec<Entry>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take in the latest message list.
    ///
    /// When the known messages are a prefix of `messages` (matched by id),
    /// existing progress is kept and only the new tail is added. Any other
    /// list is a wholesale replacement, see [`Self::replace`].
    ///
    /// An empty scheduler treats every list as a continuation and animates
    /// all bot turns in it. Restore a stored conversation with
    /// [`Self::replace`] instead.
    pub fn sync(&mut self, messages: &[Message]) {
        if !self.is_continuation(messages) {
            self.replace(messages);
            return;
        }

        for message in messages.iter().skip(self.entries.len()) {
            tracing::debug!(message_id = %message.id, sender = ?message.sender(), "Message added");
            self.entries.push(Entry::arriving(message.clone()));
        }
    }

    /// Replace the conversation. Every message is shown finished and any
    /// in-flight reveal is dropped.
    pub fn replace(&mut self, messages: &[Message]) {
        if let Some(active) = self.active_index() {
            tracing::info!(
                message_id = %self.entries[active].message.id,
                "Discarding in-flight reveal"
            );
        }
        self.entries = messages.iter().cloned().map(Entry::historical).collect();
    }

    fn is_continuation(&self, messages: &[Message]) -> bool {
        self.entries.len() <= messages.len()
            && self
                .entries
                .iter()
                .zip(messages)
                .all(|(entry, message)| entry.message.id == message.id)
    }

    /// Index of the first unfinished message
    pub fn active_index(&self) -> Option<usize> {
        self.entries.iter().position(|entry| !entry.state.is_done())
    }

    /// Nothing to animate
    pub fn is_idle(&self) -> bool {
        self.active_index().is_none()
    }

    /// Advance the active message by one step.
    ///
    /// Returns the new snapshots, or `None` when there was nothing to do.
    pub fn tick(&mut self) -> Option<Vec<Snapshot>> {
        let index = self.active_index()?;
        let entry = &mut self.entries[index];

        entry.state = advance(std::mem::take(&mut entry.state));
        if entry.state.is_done() {
            tracing::debug!(message_id = %entry.message.id, "Reveal finished");
        }

        Some(self.snapshots())
    }

    pub fn snapshots(&self) -> Vec<Snapshot> {
        project(
            self.entries
                .iter()
                .map(|entry| (&entry.message, &entry.state)),
        )
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}
