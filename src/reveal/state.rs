//! Reveal state types

use crate::parser::{Section, StructuredResponse};
use serde::{Deserialize, Serialize};

/// Where a message is in its reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    #[default]
    Idle,
    TypingIntro,
    TypingSections,
    Done,
}

impl RevealPhase {
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Characters are actively being disclosed
    pub fn is_typing(self) -> bool {
        matches!(self, Self::TypingIntro | Self::TypingSections)
    }
}

/// Reveal progress for one message.
///
/// Cursors only move forward. Once `phase` is [`RevealPhase::Done`] the value
/// never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RevealState {
    /// Fully parsed response being revealed
    pub(super) target: StructuredResponse,
    pub(super) phase: RevealPhase,
    /// Intro split into sentences, filled on the first advance
    pub(super) intro_sentences: Vec<String>,
    /// Whitespace in front of each sentence in the original intro
    pub(super) intro_gaps: Vec<String>,
    /// Text after the last sentence, shown once the intro is complete
    pub(super) intro_tail: String,
    pub(super) sentence_index: usize,
    pub(super) char_index: usize,
    pub(super) revealed_sentences: Vec<String>,
    pub(super) section_index: usize,
    pub(super) section_char_index: usize,
    /// Text revealed so far for the section at `section_index`
    pub(super) section_text: String,
    pub(super) revealed_sections: Vec<Section>,
}

impl RevealState {
    /// Fresh state waiting for its first tick.
    ///
    /// A response with nothing to reveal starts out finished.
    pub fn new(target: StructuredResponse) -> Self {
        if total_steps(&target) == 0 {
            return Self::finished(target);
        }
        Self {
            target,
            ..Self::default()
        }
    }

    /// Terminal state with the whole response visible
    pub fn finished(target: StructuredResponse) -> Self {
        let intro_sentences = split_sentences(&target.intro);
        let (intro_gaps, intro_tail) = intro_gaps(&target.intro, &intro_sentences);
        Self {
            phase: RevealPhase::Done,
            intro_gaps,
            intro_tail,
            sentence_index: intro_sentences.len(),
            revealed_sentences: intro_sentences.clone(),
            intro_sentences,
            section_index: target.sections.len(),
            revealed_sections: target.sections.clone(),
            target,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase.is_done()
    }

    pub fn target(&self) -> &StructuredResponse {
        &self.target
    }

    /// Content visible so far. Once finished this equals the target.
    pub fn revealed(&self) -> StructuredResponse {
        let mut intro = String::new();
        for (gap, sentence) in self.intro_gaps.iter().zip(&self.revealed_sentences) {
            intro.push_str(gap);
            intro.push_str(sentence);
        }
        if matches!(self.phase, RevealPhase::TypingSections | RevealPhase::Done) {
            intro.push_str(&self.intro_tail);
        }

        StructuredResponse {
            intro,
            sections: self.revealed_sections.clone(),
        }
    }

    /// Number of characters disclosed so far
    pub fn steps_taken(&self) -> usize {
        let intro: usize = self
            .revealed_sentences
            .iter()
            .map(|sentence| sentence.chars().count())
            .sum();
        let finished_sections: usize = self
            .target
            .sections
            .iter()
            .take(self.section_index)
            .map(|section| section_text(section).chars().count())
            .sum();
        intro + finished_sections + self.section_char_index
    }
}

/// Split an intro after `.`, `!` or `?` followed by whitespace.
///
/// Sentences are trimmed and empty fragments dropped.
pub fn split_sentences(intro: &str) -> Vec<String> {
    fn push_trimmed(sentences: &mut Vec<String>, sentence: &str) {
        let trimmed = sentence.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }
    }

    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = intro.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') && chars.peek().is_some_and(|next| next.is_whitespace()) {
            while chars.next_if(|next| next.is_whitespace()).is_some() {}
            push_trimmed(&mut sentences, &current);
            current.clear();
        }
    }
    push_trimmed(&mut sentences, &current);

    sentences
}

/// Whitespace in front of each sentence, and whatever follows the last one.
///
/// `sentences` must come from [`split_sentences`] on the same intro, so every
/// gap is whitespace and each sentence is found right after its gap.
pub(super) fn intro_gaps(intro: &str, sentences: &[String]) -> (Vec<String>, String) {
    let mut gaps = Vec::with_capacity(sentences.len());
    let mut rest = intro;
    for sentence in sentences {
        match rest.split_once(sentence.as_str()) {
            Some((gap, after)) => {
                gaps.push(gap.to_string());
                rest = after;
            }
            None => gaps.push(String::new()),
        }
    }
    (gaps, rest.to_string())
}

/// Text typed out for one section: the title, then one course per line
pub(super) fn section_text(section: &Section) -> String {
    format!("{}\n{}", section.title, section.courses.join("\n"))
}

/// Number of advances needed to fully reveal a response
pub fn total_steps(target: &StructuredResponse) -> usize {
    let intro: usize = split_sentences(&target.intro)
        .iter()
        .map(|sentence| sentence.chars().count())
        .sum();
    let sections: usize = target
        .sections
        .iter()
        .map(|section| section_text(section).chars().count())
        .sum();
    intro + sections
}
