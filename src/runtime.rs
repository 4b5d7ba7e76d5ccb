//! Reveal runtime
//!
//! A single tokio task owns the [`AnimationScheduler`]. Message-list updates
//! arrive as commands, a fixed interval drives the reveal, and every change is
//! broadcast as a [`Frame`]. Only this task ever touches reveal state.

use crate::config::RevealConfig;
use crate::message::Message;
use crate::scheduler::AnimationScheduler;
use crate::view::{Frame, Snapshot};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Reveal runtime has stopped")]
    Stopped,
}

#[derive(Debug)]
enum Command {
    /// Latest message list, usually the previous one plus new turns
    Sync(Vec<Message>),
    /// Switch conversation, nothing is replayed
    Replace(Vec<Message>),
    SetLoading(bool),
}

struct RevealRuntime {
    scheduler: AnimationScheduler,
    is_loading: bool,
    tick: Duration,
    command_rx: mpsc::Receiver<Command>,
    frame_tx: broadcast::Sender<Frame>,
    cancel: CancellationToken,
}

impl RevealRuntime {
    async fn run(mut self) {
        tracing::info!(tick_ms = %self.tick.as_millis(), "Starting reveal runtime");

        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let animating = !self.scheduler.is_idle();

            tokio::select! {
                () = self.cancel.cancelled() => break,
                command = self.command_rx.recv() => {
                    let Some(command) = command else { break };
                    self.apply(command);
                    // The interval was parked while idle, start a fresh period
                    if !animating && !self.scheduler.is_idle() {
                        ticker.reset();
                    }
                    self.publish(self.scheduler.snapshots());
                }
                _ = ticker.tick(), if animating => {
                    if let Some(snapshots) = self.scheduler.tick() {
                        self.publish(snapshots);
                    }
                }
            }
        }

        tracing::info!("Reveal runtime stopped");
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Sync(messages) => self.scheduler.sync(&messages),
            Command::Replace(messages) => {
                tracing::info!(count = messages.len(), "Replacing conversation");
                self.scheduler.replace(&messages);
            }
            Command::SetLoading(is_loading) => self.is_loading = is_loading,
        }
    }

    fn publish(&self, messages: Vec<Snapshot>) {
        // No subscribers is fine, frames are fire-and-forget
        let _ = self.frame_tx.send(Frame {
            messages,
            is_loading: self.is_loading,
        });
    }
}

/// Handle to a running reveal runtime.
///
/// Dropping the handle stops the runtime and its timer.
pub struct RevealHandle {
    command_tx: mpsc::Sender<Command>,
    frame_tx: broadcast::Sender<Frame>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RevealHandle {
    /// Spawn the runtime on the current tokio runtime
    pub fn spawn(config: &RevealConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (frame_tx, _) = broadcast::channel(config.frame_buffer);
        let cancel = CancellationToken::new();

        let runtime = RevealRuntime {
            scheduler: AnimationScheduler::new(),
            is_loading: false,
            tick: config.tick,
            command_rx,
            frame_tx: frame_tx.clone(),
            cancel: cancel.clone(),
        };
        let task = tokio::spawn(runtime.run());

        Self {
            command_tx,
            frame_tx,
            cancel,
            task: Some(task),
        }
    }

    /// Receive every frame published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Frame> {
        self.frame_tx.subscribe()
    }

    /// Push the latest message list; known messages keep their progress.
    ///
    /// On a fresh handle every bot turn in the list is animated. Use
    /// [`Self::replace`] to show a stored conversation.
    pub async fn sync(&self, messages: Vec<Message>) -> Result<(), RuntimeError> {
        self.send(Command::Sync(messages)).await
    }

    /// Switch to another conversation without replaying it
    pub async fn replace(&self, messages: Vec<Message>) -> Result<(), RuntimeError> {
        self.send(Command::Replace(messages)).await
    }

    pub async fn set_loading(&self, is_loading: bool) -> Result<(), RuntimeError> {
        self.send(Command::SetLoading(is_loading)).await
    }

    /// Stop the runtime and wait for its task to finish
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Reveal runtime task failed");
            }
        }
    }

    async fn send(&self, command: Command) -> Result<(), RuntimeError> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::Stopped)
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
