//! Reveal Chat - structured bot answers, typed out one character at a time
//!
//! Bot responses are parsed into an intro plus titled course lists and then
//! revealed progressively. A pure state machine does the revealing, a
//! scheduler picks which message animates, and a tokio runtime drives it on
//! a fixed tick and broadcasts render-ready frames.

pub mod config;
pub mod message;
pub mod parser;
pub mod reveal;
pub mod runtime;
pub mod scheduler;
pub mod session;
pub mod transport;
pub mod view;

pub use config::RevealConfig;
pub use message::{Message, MessageId, MessageKind, Sender};
pub use parser::{parse, Section, StructuredResponse};
pub use reveal::{advance, RevealPhase, RevealState};
pub use runtime::{RevealHandle, RuntimeError};
pub use scheduler::AnimationScheduler;
pub use session::{ChatSession, SessionError};
pub use transport::{ChatRequest, ChatResponse, ChatTransport, LoggingTransport, TransportError};
pub use view::{Frame, Snapshot, SnapshotBody};
