//! Chat session
//!
//! Ties a transport to the reveal runtime: owns the current message list,
//! sends user turns, appends replies and switches conversations.

use crate::config::RevealConfig;
use crate::message::Message;
use crate::runtime::{RevealHandle, RuntimeError};
use crate::transport::{bot_reply, ChatRequest, ChatTransport};
use crate::view::Frame;
use thiserror::Error;
use tokio::sync::broadcast;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub struct ChatSession<T: ChatTransport> {
    transport: T,
    messages: Vec<Message>,
    reveal: RevealHandle,
}

impl<T: ChatTransport> ChatSession<T> {
    /// Start a session with an empty conversation.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(transport: T, config: &RevealConfig) -> Self {
        Self {
            transport,
            messages: Vec::new(),
            reveal: RevealHandle::spawn(config),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Frame> {
        self.reveal.subscribe()
    }

    /// Current conversation, for whoever persists it
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Send a user turn and append the reply.
    ///
    /// Transport failures do not fail the call; they show up as an error
    /// turn in the conversation.
    pub async fn send(&mut self, text: &str) -> Result<Message, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        self.push(Message::user(text)).await?;
        self.reveal.set_loading(true).await?;

        let request = ChatRequest {
            query: text.to_string(),
        };
        let reply = bot_reply(self.transport.send(&request).await);

        self.push(reply.clone()).await?;
        self.reveal.set_loading(false).await?;

        Ok(reply)
    }

    /// Switch to a stored conversation. Nothing is replayed.
    pub async fn load_conversation(&mut self, messages: Vec<Message>) -> Result<(), SessionError> {
        tracing::info!(count = messages.len(), "Loading conversation");
        self.messages.clone_from(&messages);
        self.reveal.replace(messages).await?;
        Ok(())
    }

    pub async fn new_conversation(&mut self) -> Result<(), SessionError> {
        self.load_conversation(Vec::new()).await
    }

    pub async fn shutdown(self) {
        self.reveal.shutdown().await;
    }

    async fn push(&mut self, message: Message) -> Result<(), SessionError> {
        self.messages.push(message);
        self.reveal.sync(self.messages.clone()).await?;
        Ok(())
    }
}
