//! Sentence boundary detection.
//!
//! A byte scanner over normalized ASCII text. Boundaries are decided in this
//! order: an ellipsis always splits, then a dot closing a known abbreviation
//! is kept mid-sentence unless the following text signals a new sentence,
//! then terminators inside an open quotation are kept mid-sentence unless
//! followed by a space and an uppercase letter, and anything else splits.

use crate::lexicon::LexicalStore;
use crate::word_lists::TITLE_ABBREVIATIONS;

use super::normalize;

/// Splits `text` into trimmed, non-empty sentences.
///
/// Blank input yields an empty list.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str, store: &dyn LexicalStore) -> Vec<String> {
    let normalized = normalize(text);
    let text = normalized.trim();
    let bytes = text.as_bytes();

    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut i = 0;

    while i < bytes.len() {
        let ch = bytes[i];

        if ch == b'"' {
            in_quote = !in_quote;
            current.push('"');
            i += 1;
            continue;
        }

        if bytes[i..].starts_with(b"...") {
            current.push_str("...");
            i += 3;
            flush(&mut current, &mut sentences);
            continue;
        }

        if is_terminator(ch) {
            current.push(char::from(ch));

            if ch == b'.'
                && is_abbreviation_at(bytes, i, store)
                && !abbreviation_ends_sentence(bytes, i)
            {
                i += 1;
                continue;
            }
            if in_quote && !followed_by_space_uppercase(bytes, i) {
                i += 1;
                continue;
            }

            i += 1;
            while i < bytes.len() && is_terminator(bytes[i]) {
                current.push(char::from(bytes[i]));
                i += 1;
            }
            while i < bytes.len() && bytes[i] == b'"' {
                current.push('"');
                in_quote = !in_quote;
                i += 1;
            }
            flush(&mut current, &mut sentences);
            continue;
        }

        current.push(char::from(ch));
        i += 1;
    }
    flush(&mut current, &mut sentences);

    tracing::trace!(sentences = sentences.len(), "split sentences");
    sentences
}

const fn is_terminator(b: u8) -> bool {
    matches!(b, b'.' | b'!' | b'?')
}

const fn is_abbreviation_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'.'
}

fn flush(current: &mut String, sentences: &mut Vec<String>) {
    let sentence = current.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
    current.clear();
}

/// Start of the letters-and-dots run that ends just before `dot`.
fn span_start(bytes: &[u8], dot: usize) -> usize {
    let mut start = dot;
    while start > 0 && is_abbreviation_byte(bytes[start - 1]) {
        start -= 1;
    }
    start
}

fn lowercase_span(bytes: &[u8], start: usize, end: usize) -> String {
    String::from_utf8_lossy(&bytes[start..end]).to_ascii_lowercase()
}

/// Whether the dot at `dot` closes a known abbreviation.
///
/// Both the whole letters-and-dots span around the dot (`i.e.` seen from
/// either dot) and the span ending at this dot (`mr.`) are tried.
fn is_abbreviation_at(bytes: &[u8], dot: usize, store: &dyn LexicalStore) -> bool {
    let start = span_start(bytes, dot);
    if start == dot {
        return false;
    }

    let mut end = dot + 1;
    while end < bytes.len() && is_abbreviation_byte(bytes[end]) {
        end += 1;
    }

    store.is_abbreviation(&lowercase_span(bytes, start, end))
        || store.is_abbreviation(&lowercase_span(bytes, start, dot + 1))
}

/// Whether the text after an abbreviation's dot starts a new sentence.
///
/// End of text and line breaks end the sentence. A capitalized next word ends
/// it too, except after a title such as `Dr.`.
fn abbreviation_ends_sentence(bytes: &[u8], dot: usize) -> bool {
    let mut j = skip_quotes(bytes, dot + 1);
    let Some(&next) = bytes.get(j) else {
        return true;
    };
    if next == b'\n' || next == b'\r' {
        return true;
    }
    if !next.is_ascii_whitespace() {
        return false;
    }

    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
        if bytes[j] == b'\n' || bytes[j] == b'\r' {
            return true;
        }
        j += 1;
    }

    j = skip_quotes(bytes, j);
    let Some(&next) = bytes.get(j) else {
        return true;
    };
    if !next.is_ascii_uppercase() {
        return false;
    }

    let abbreviation = lowercase_span(bytes, span_start(bytes, dot), dot + 1);
    !TITLE_ABBREVIATIONS.contains(abbreviation.as_str())
}

/// Whether `pos` is followed by optional closing quotes, one space, and an
/// uppercase letter.
fn followed_by_space_uppercase(bytes: &[u8], pos: usize) -> bool {
    let j = skip_quotes(bytes, pos + 1);
    bytes.get(j) == Some(&b' ') && bytes.get(j + 1).is_some_and(u8::is_ascii_uppercase)
}

fn skip_quotes(bytes: &[u8], mut j: usize) -> usize {
    while j < bytes.len() && bytes[j] == b'"' {
        j += 1;
    }
    j
}
