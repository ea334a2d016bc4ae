//! Numbered question detection in OCR text
//!
//! A question line opens with a one- or two-digit ordinal followed by `.` or
//! `)`, whitespace, and the question body. Each line is matched on its own, so
//! a transcription yields at most one entry per line, in line order.

use once_cell::sync::Lazy;
use regex::Regex;

/// `(?mR)` anchors `^`/`$` at every line and treats `\r\n` as a terminator.
/// Leading and separating whitespace never crosses a line end.
static QUESTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mR)^[^\S\r\n]*([0-9]{1,2})[.)][^\S\r\n]+(.+)$").expect("static regex")
});

/// One numbered line found in a transcription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEntry {
    /// Digits exactly as captured; not renumbered or deduplicated
    pub ordinal: String,
    /// Rest of the line after the delimiter and whitespace
    pub text: String,
}

impl QuestionEntry {
    /// The body cut to at most `max_chars` characters
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }
}

/// Find every numbered question line in `text`, top to bottom.
pub fn locate(text: &str) -> Vec<QuestionEntry> {
    QUESTION_RE
        .captures_iter(text)
        .map(|caps| QuestionEntry {
            ordinal: caps[1].to_string(),
            text: caps[2].to_string(),
        })
        .collect()
}
