//! Property-based tests for the response parser

use super::*;
use proptest::prelude::*;

fn arb_title() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,8}( [0-9])?"
}

fn arb_course() -> impl Strategy<Value = String> {
    "[A-Z]{2,4}[0-9]{3}"
}

fn arb_section() -> impl Strategy<Value = Section> {
    (arb_title(), proptest::collection::vec(arb_course(), 1..5))
        .prop_map(|(title, courses)| Section { title, courses })
}

fn render(intro: &str, sections: &[Section]) -> String {
    let body: Vec<String> = sections
        .iter()
        .map(|s| format!("**{}**: {}", s.title, s.courses.join(" + ")))
        .collect();
    format!("{intro}\n\n{}", body.join("\n"))
}

/// Intro sentence with one bolded word somewhere after its start
fn arb_bold_intro() -> impl Strategy<Value = String> {
    ("[A-Z][a-z]{0,10}", "[a-z]{1,8}", "[a-z ]{0,12}")
        .prop_map(|(lead, word, tail)| format!("{lead} **{word}** {tail}."))
}

proptest! {
    #[test]
    fn prop_parse_is_deterministic(raw in "(?s).{0,200}") {
        prop_assert_eq!(parse(&raw), parse(&raw));
    }

    #[test]
    fn prop_unmarked_text_is_plain(raw in "[^*+]{0,200}") {
        prop_assert_eq!(parse(&raw), StructuredResponse::plain(raw.clone()));
    }

    #[test]
    fn prop_sections_never_blank(raw in "[a-z :*+\n]{0,120}") {
        let parsed = parse(&raw);
        for section in &parsed.sections {
            prop_assert!(!section.title.trim().is_empty());
            prop_assert!(!section.courses.is_empty());
            for course in &section.courses {
                prop_assert!(!course.trim().is_empty());
            }
        }
        if !parsed.is_structured() {
            prop_assert_eq!(parsed.intro, raw);
        }
    }

    #[test]
    fn prop_well_formed_text_round_trips(
        intro in "[A-Z][a-z ]{0,30}\\.",
        sections in proptest::collection::vec(arb_section(), 1..4),
    ) {
        let parsed = parse(&render(&intro, &sections));
        prop_assert_eq!(parsed.intro, intro.trim());
        prop_assert_eq!(parsed.sections, sections);
    }

    #[test]
    fn prop_bold_intro_survives(
        intro in arb_bold_intro(),
        sections in proptest::collection::vec(arb_section(), 1..4),
    ) {
        let parsed = parse(&render(&intro, &sections));
        prop_assert_eq!(parsed.intro, intro.trim());
        prop_assert_eq!(parsed.sections, sections);
    }

    #[test]
    fn prop_bold_intro_without_sections_is_plain(
        intro in arb_bold_intro(),
        body in "[a-z0-9 +]{0,40}",
    ) {
        let raw = format!("{intro}\n\n{body}");
        prop_assert_eq!(parse(&raw), StructuredResponse::plain(raw.clone()));
    }
}
