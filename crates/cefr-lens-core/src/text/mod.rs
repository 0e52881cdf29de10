//! Text segmentation.
//!
//! Turns raw input into the two views the scorers consume: an ordered list of
//! [`Token`]s and an ordered list of sentences. Both are computed from the
//! same [`normalize`]d text but independently of each other.

mod sentences;
mod tokenize;

pub use sentences::split_sentences;
pub use tokenize::tokenize;

/// A word or punctuation run produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Text as it appeared in the input, after contraction handling.
    pub original: String,
    /// Lowercase form used for lookups.
    pub lower: String,
    /// First word of a sentence.
    pub is_first: bool,
    /// Detected as a proper noun or acronym.
    pub is_proper: bool,
    /// A function word from the stopword list.
    pub is_stopword: bool,
    /// Punctuation, a number, or anything else without letters.
    pub is_filtered: bool,
}

impl Token {
    /// Whether this token counts as a content word for vocabulary scoring.
    pub const fn is_content(&self) -> bool {
        !self.is_filtered && !self.is_stopword && !self.is_proper
    }
}

/// Maps typographic punctuation to ASCII and drops every other non-ASCII
/// character.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            c if c.is_ascii() => out.push(c),
            _ => {}
        }
    }
    out
}

/// Splits `sentence` on whitespace, strips non-letters from both ends of each
/// piece, and lowercases what remains. Empty pieces are dropped.
pub fn sentence_words(sentence: &str) -> Vec<String> {
    sentence
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_ascii_alphabetic()))
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

/// Number of whitespace-delimited words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
