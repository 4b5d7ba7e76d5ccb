//! Property-based tests for the reveal state machine
//!
//! These verify that reveal only ever adds content and always ends with the
//! full response on screen.

use super::*;
use crate::parser::{Section, StructuredResponse};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_sentence() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,10}( [a-z]{1,8}){0,3}[.!?]"
}

fn arb_intro() -> impl Strategy<Value = String> {
    (
        "[ \n]{0,2}",
        proptest::collection::vec((arb_sentence(), "[ \n]{1,3}"), 0..4),
    )
        .prop_map(|(lead, sentences)| {
            let mut intro = lead;
            for (sentence, gap) in sentences {
                intro.push_str(&sentence);
                intro.push_str(&gap);
            }
            intro
        })
}

fn arb_section() -> impl Strategy<Value = Section> {
    (
        "[A-Z][a-z]{1,8}",
        proptest::collection::vec("[A-Z]{2,4}[0-9]{1,3}", 1..4),
    )
        .prop_map(|(title, courses)| Section { title, courses })
}

fn arb_response() -> impl Strategy<Value = StructuredResponse> {
    (arb_intro(), proptest::collection::vec(arb_section(), 0..4))
        .prop_map(|(intro, sections)| StructuredResponse { intro, sections })
}

/// Every element of `before` still present in `after`
fn is_contained(before: &[String], after: &[String]) -> bool {
    before.iter().all(|item| after.contains(item))
}

fn only_grew(before: &StructuredResponse, after: &StructuredResponse) -> bool {
    if !after.intro.starts_with(&before.intro) {
        return false;
    }
    if after.sections.len() < before.sections.len() {
        return false;
    }
    before
        .sections
        .iter()
        .zip(&after.sections)
        .all(|(old, new)| new.title.starts_with(&old.title) && is_contained(&old.courses, &new.courses))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_reveal_is_monotonic(target in arb_response()) {
        let mut state = RevealState::new(target);
        while !state.is_done() {
            let before = state.revealed();
            let steps_before = state.steps_taken();

            state = advance(state);

            prop_assert!(only_grew(&before, &state.revealed()));
            prop_assert_eq!(state.steps_taken(), steps_before + 1);
        }
    }

    #[test]
    fn prop_reveal_completes_in_total_steps(target in arb_response()) {
        let steps = total_steps(&target);
        let mut state = RevealState::new(target.clone());

        for step in 0..steps {
            prop_assert!(!state.is_done(), "finished early at step {}", step);
            state = advance(state);
        }

        prop_assert!(state.is_done());
        prop_assert_eq!(state.revealed(), target);
    }

    #[test]
    fn prop_advance_is_deterministic(target in arb_response(), steps in 0usize..40) {
        let mut left = RevealState::new(target.clone());
        let mut right = RevealState::new(target);
        for _ in 0..steps {
            left = advance(left);
            right = advance(right);
        }
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_done_never_changes(target in arb_response()) {
        let done = RevealState::finished(target);
        prop_assert_eq!(advance(done.clone()), done);
    }

    #[test]
    fn prop_phases_only_move_forward(target in arb_response()) {
        let rank = |phase: RevealPhase| match phase {
            RevealPhase::Idle => 0,
            RevealPhase::TypingIntro => 1,
            RevealPhase::TypingSections => 2,
            RevealPhase::Done => 3,
        };
        let mut state = RevealState::new(target);
        while !state.is_done() {
            let before = rank(state.phase());
            state = advance(state);
            prop_assert!(rank(state.phase()) >= before);
        }
    }
}
