//! Progressive reveal state machine
//!
//! Each bot message owns one [`RevealState`]. [`advance`] is a pure step that
//! discloses exactly one more character of the parsed response; the caller
//! stores the returned state.

mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use state::{split_sentences, total_steps, RevealPhase, RevealState};
pub use transition::advance;
