//! Pure reveal step
//!
//! `advance` takes a state by value and returns the next one. Given the same
//! input it always produces the same output.

use super::state::{intro_gaps, section_text, split_sentences, RevealPhase, RevealState};
use crate::parser::Section;

/// Disclose one more character.
///
/// The first call on an idle state segments the intro and reveals its first
/// character. Calling this on a finished state returns it unchanged.
pub fn advance(state: RevealState) -> RevealState {
    match state.phase {
        RevealPhase::Done => state,
        RevealPhase::Idle => reveal_next(begin(state)),
        RevealPhase::TypingIntro | RevealPhase::TypingSections => reveal_next(state),
    }
}

fn begin(mut state: RevealState) -> RevealState {
    state.intro_sentences = split_sentences(&state.target.intro);
    let (gaps, tail) = intro_gaps(&state.target.intro, &state.intro_sentences);
    state.intro_gaps = gaps;
    state.intro_tail = tail;
    state.phase = RevealPhase::TypingIntro;
    settle(state)
}

fn reveal_next(state: RevealState) -> RevealState {
    match state.phase {
        RevealPhase::TypingIntro => settle(type_intro_char(state)),
        RevealPhase::TypingSections => settle(type_section_char(state)),
        RevealPhase::Idle | RevealPhase::Done => state,
    }
}

/// Move past phases that have nothing left to reveal
fn settle(mut state: RevealState) -> RevealState {
    if state.phase == RevealPhase::TypingIntro
        && state.sentence_index >= state.intro_sentences.len()
    {
        state.phase = if state.target.sections.is_empty() {
            RevealPhase::Done
        } else {
            RevealPhase::TypingSections
        };
    }
    if state.phase == RevealPhase::TypingSections
        && state.section_index >= state.target.sections.len()
    {
        state.phase = RevealPhase::Done;
    }
    state
}

fn type_intro_char(mut state: RevealState) -> RevealState {
    let Some(sentence) = state.intro_sentences.get(state.sentence_index) else {
        return state;
    };
    let Some(ch) = sentence.chars().nth(state.char_index) else {
        return state;
    };
    let sentence_len = sentence.chars().count();

    if state.revealed_sentences.len() <= state.sentence_index {
        state.revealed_sentences.push(String::new());
    }
    if let Some(revealed) = state.revealed_sentences.last_mut() {
        revealed.push(ch);
    }
    state.char_index += 1;

    if state.char_index >= sentence_len {
        state.sentence_index += 1;
        state.char_index = 0;
    }
    state
}

fn type_section_char(mut state: RevealState) -> RevealState {
    let Some(section) = state.target.sections.get(state.section_index) else {
        return state;
    };
    let full_text = section_text(section);
    let Some(ch) = full_text.chars().nth(state.section_char_index) else {
        return state;
    };

    if state.section_char_index == 0 {
        state.section_text.clear();
        state.revealed_sections.push(Section {
            title: String::new(),
            courses: Vec::new(),
        });
    }
    state.section_text.push(ch);
    state.section_char_index += 1;

    // A course counts as visible once its whole name appears in the typed
    // text. Short names contained in longer ones can show up early.
    let visible = Section {
        title: state
            .section_text
            .chars()
            .take(section.title.chars().count())
            .collect(),
        courses: section
            .courses
            .iter()
            .filter(|course| state.section_text.contains(course.as_str()))
            .cloned()
            .collect(),
    };
    if let Some(revealed) = state.revealed_sections.last_mut() {
        *revealed = visible;
    }

    if state.section_char_index >= full_text.chars().count() {
        state.section_index += 1;
        state.section_char_index = 0;
        state.section_text.clear();
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, StructuredResponse};
    use crate::reveal::total_steps;

    fn run(mut state: RevealState, steps: usize) -> RevealState {
        for _ in 0..steps {
            state = advance(state);
        }
        state
    }

    #[test]
    fn test_first_advance_reveals_one_char() {
        let state = advance(RevealState::new(StructuredResponse::plain("Hi there.")));

        assert_eq!(state.phase(), RevealPhase::TypingIntro);
        assert_eq!(state.revealed().intro, "H");
        assert_eq!(state.steps_taken(), 1);
    }

    #[test]
    fn test_sentences_joined_while_typing() {
        let state = run(RevealState::new(StructuredResponse::plain("Hi. Yo!")), 4);
        assert_eq!(state.revealed().intro, "Hi. Y");
    }

    #[test]
    fn test_line_breaks_between_sentences_survive() {
        let raw = "Step 1.\nStep 2.";
        let state = run(RevealState::new(parse(raw)), 9);
        assert_eq!(state.revealed().intro, "Step 1.\nSt");

        let state = run(state, total_steps(&parse(raw)) - 9);
        assert!(state.is_done());
        assert_eq!(state.revealed().intro, raw);
    }

    #[test]
    fn test_plain_text_finishes_without_sections() {
        let raw = "Sorry, I can't help with that.";
        let state = run(RevealState::new(parse(raw)), raw.chars().count());

        assert!(state.is_done());
        assert_eq!(state.revealed(), StructuredResponse::plain(raw));
    }

    #[test]
    fn test_section_title_then_courses() {
        let target = parse("Plan.\n\n**Fall**: CS101 + MATH101");
        let intro_len = "Plan.".len();

        let state = run(RevealState::new(target.clone()), intro_len);
        assert_eq!(state.phase(), RevealPhase::TypingSections);
        assert!(state.revealed().sections.is_empty());

        let state = run(state, 2);
        let sections = state.revealed().sections;
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Fa");
        assert!(sections[0].courses.is_empty());

        // "Fall\nCS101" typed
        let state = run(state, 8);
        assert_eq!(state.revealed().sections[0].title, "Fall");
        assert_eq!(state.revealed().sections[0].courses, vec!["CS101"]);

        let remaining = total_steps(&target) - state.steps_taken();
        let state = run(state, remaining);
        assert!(state.is_done());
        assert_eq!(state.revealed(), target);
    }

    #[test]
    fn test_done_is_idempotent() {
        let target = parse("Intro.\n\n**A**: x + y");
        let done = run(RevealState::new(target.clone()), total_steps(&target));
        assert!(done.is_done());
        assert_eq!(advance(done.clone()), done);
    }

    #[test]
    fn test_empty_intro_goes_straight_to_sections() {
        let target = StructuredResponse {
            intro: "  ".to_string(),
            sections: parse("x\n\n**A**: b + c").sections,
        };
        let state = advance(RevealState::new(target));

        assert_eq!(state.phase(), RevealPhase::TypingSections);
        assert_eq!(state.revealed().sections[0].title, "A");
    }
}
