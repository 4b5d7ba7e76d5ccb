//! Structured response parser
//!
//! Bot answers sometimes follow one convention: an intro paragraph, a blank
//! line, then `**Title**: item + item + item` groups. Anything else is kept
//! as plain intro text. Parsing never fails.

#[cfg(test)]
mod proptests;

use serde::{Deserialize, Serialize};

/// Markup pair that surrounds a section title
pub const TITLE_DELIMITER: &str = "**";
/// Separator between list items inside a section
pub const ITEM_SEPARATOR: char = '+';
/// Intro used when the structured text has no lead-in paragraph
pub const FILLER_INTRO: &str =
    "Here’s the list of courses for your curriculum! I’ve organized them by semester for clarity.";

const PARAGRAPH_BREAK: &str = "\n\n";
const TITLE_SEPARATOR: char = ':';

/// One titled group of list items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub courses: Vec<String>,
}

/// Parse result for a bot turn
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructuredResponse {
    pub intro: String,
    pub sections: Vec<Section>,
}

impl StructuredResponse {
    /// Unstructured result: the whole text is the intro
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            intro: text.into(),
            sections: Vec::new(),
        }
    }

    pub fn is_structured(&self) -> bool {
        !self.sections.is_empty()
    }
}

/// Parse a raw bot response.
///
/// Falls back to [`StructuredResponse::plain`] with the raw text verbatim
/// whenever the text does not look structured or no section survives
/// filtering.
pub fn parse(raw: &str) -> StructuredResponse {
    if !raw.contains(TITLE_DELIMITER) || !raw.contains(ITEM_SEPARATOR) {
        return StructuredResponse::plain(raw);
    }

    let (intro, body) = split_intro(raw);
    let sections: Vec<Section> = fragments(body)
        .iter()
        .filter_map(|fragment| parse_section(fragment))
        .collect();

    if sections.is_empty() {
        tracing::debug!("Delimiters present but no usable section, keeping plain text");
        return StructuredResponse::plain(raw);
    }

    StructuredResponse {
        intro: intro.to_string(),
        sections,
    }
}

/// Split off the lead-in paragraph.
///
/// A first paragraph that is blank or opens with a title is part of the
/// section body, and the canned intro is used instead. Bold text further
/// into the paragraph does not count as a title.
fn split_intro(raw: &str) -> (&str, &str) {
    match raw.split_once(PARAGRAPH_BREAK) {
        Some((head, rest)) if !opens_section(head) => (head.trim(), rest),
        _ => (FILLER_INTRO, raw),
    }
}

fn opens_section(paragraph: &str) -> bool {
    let paragraph = paragraph.trim_start();
    paragraph.is_empty() || paragraph.starts_with(TITLE_DELIMITER)
}

/// Candidate section texts with the title markup removed.
///
/// Every delimited title is joined with the body that follows it, so
/// `**Fall**: A + B` becomes `Fall: A + B`. Text before the first title is a
/// candidate of its own.
fn fragments(body: &str) -> Vec<String> {
    let mut pieces = body.split(TITLE_DELIMITER);
    let lead = pieces.next().unwrap_or_default();
    let titled: Vec<&str> = pieces.collect();

    std::iter::once(lead.to_string())
        .chain(titled.chunks(2).map(<[&str]>::concat))
        .filter(|fragment| !fragment.trim().is_empty())
        .collect()
}

/// Only the first colon separates title from items.
fn parse_section(fragment: &str) -> Option<Section> {
    let (title, content) = fragment.split_once(TITLE_SEPARATOR)?;
    let title = title.trim();

    let courses: Vec<String> = content
        .split(ITEM_SEPARATOR)
        .map(str::trim)
        .filter(|course| !course.is_empty())
        .map(str::to_string)
        .collect();

    if title.is_empty() || courses.is_empty() {
        return None;
    }

    Some(Section {
        title: title.to_string(),
        courses,
    })
}
