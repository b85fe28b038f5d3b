//! Paragraph-grouped, word-wrapped prose.
//!
//! Consecutive segments are merged into paragraphs. A new paragraph starts
//! when the previous segment ends a sentence and the next one starts with an
//! upper-case letter, or when either side carries a `[...]` annotation such
//! as `[Music]`. Paragraphs are wrapped greedily at word boundaries.

use super::TranscriptFormatter;
use crate::error::Result;
use crate::transcript::TimedTextSegment;

pub const DEFAULT_LINE_LENGTH: usize = 80;

pub struct ReadableFormatter {
    /// Maximum line length in characters; 0 disables wrapping.
    pub max_line_length: usize,
}

impl Default for ReadableFormatter {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_LINE_LENGTH,
        }
    }
}

impl ReadableFormatter {
    pub fn with_line_length(max_line_length: usize) -> Self {
        Self { max_line_length }
    }
}

impl TranscriptFormatter for ReadableFormatter {
    fn format(&self, segments: &[TimedTextSegment]) -> Result<String> {
        Ok(group_into_paragraphs(segments)
            .iter()
            .map(|p| wrap_text(p, self.max_line_length))
            .collect::<Vec<_>>()
            .join("\n\n"))
    }

    fn name(&self) -> &'static str {
        "readable"
    }
}

fn should_start_new_paragraph(prev: &str, curr: &str) -> bool {
    let ends_sentence = prev.trim().ends_with(['.', '!', '?']);
    let starts_capital = curr.chars().next().is_some_and(char::is_uppercase);
    let has_annotation = prev.contains('[') || curr.contains('[');

    (ends_sentence && starts_capital) || has_annotation
}

fn group_into_paragraphs(segments: &[TimedTextSegment]) -> Vec<String> {
    let Some((first, rest)) = segments.split_first() else {
        return Vec::new();
    };

    let mut paragraphs = Vec::new();
    let mut current = first.text().to_string();
    let mut prev = first.text();

    for segment in rest {
        let text = segment.text();
        if should_start_new_paragraph(prev, text) {
            paragraphs.push(std::mem::replace(&mut current, text.to_string()));
        } else {
            if !current.ends_with(' ') && !text.starts_with(' ') {
                current.push(' ');
            }
            current.push_str(text);
        }
        prev = text;
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

fn wrap_text(text: &str, line_length: usize) -> String {
    if line_length == 0 {
        return text.to_string();
    }

    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };

    let mut lines = Vec::new();
    let mut line = first.to_string();
    let mut line_chars = first.chars().count();

    for word in words {
        let word_chars = word.chars().count();
        if line_chars + 1 + word_chars > line_length {
            lines.push(std::mem::replace(&mut line, word.to_string()));
            line_chars = word_chars;
        } else {
            line.push(' ');
            line.push_str(word);
            line_chars += 1 + word_chars;
        }
    }
    lines.push(line);

    lines.join("\n")
}
