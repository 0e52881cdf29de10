//! Word tokenization and token tagging.

use crate::lexicon::LexicalStore;

use super::{Token, normalize};

/// Tokenizes `text` and tags every token.
///
/// Tagging runs in a fixed order: sentence-first marking, then stopwords,
/// then proper nouns (which depend on the stopword flags).
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn tokenize(text: &str, store: &dyn LexicalStore) -> Vec<Token> {
    let normalized = normalize(text);
    let mut tokens: Vec<Token> = normalized
        .split_ascii_whitespace()
        .flat_map(chunk_tokens)
        .collect();

    mark_sentence_first(&mut tokens);
    for token in tokens.iter_mut().filter(|t| !t.is_filtered) {
        token.is_stopword = store.is_stopword(&token.lower);
    }
    mark_proper_nouns(&mut tokens);

    tracing::trace!(tokens = tokens.len(), "tokenized");
    tokens
}

const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'\'' || b == b'-'
}

fn token(original: &str, is_filtered: bool) -> Token {
    Token {
        original: original.to_string(),
        lower: original.to_ascii_lowercase(),
        is_first: false,
        is_proper: false,
        is_stopword: false,
        is_filtered,
    }
}

/// Tokens for one whitespace-delimited chunk.
fn chunk_tokens(chunk: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for segment in segments(chunk) {
        if !segment.bytes().next().is_some_and(is_word_byte) {
            tokens.push(token(segment, true));
            continue;
        }
        let word = resolve_contraction(segment);
        for part in word.split('-') {
            let part = part.trim_matches('\'');
            if part.is_empty() {
                continue;
            }
            tokens.push(token(part, !part.bytes().any(|b| b.is_ascii_alphabetic())));
        }
    }
    tokens
}

/// Splits a chunk into alternating runs of word and non-word bytes.
fn segments(chunk: &str) -> Vec<&str> {
    let bytes = chunk.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        let word = is_word_byte(bytes[start]);
        let mut end = start + 1;
        while end < bytes.len() && is_word_byte(bytes[end]) == word {
            end += 1;
        }
        out.push(&chunk[start..end]);
        start = end;
    }
    out
}

/// Reduces a contraction or possessive to the word it attaches to.
///
/// Irregular negatives map to their base verb; other suffixes are stripped,
/// keeping the case of what remains.
fn resolve_contraction(word: &str) -> &str {
    let lower = word.to_ascii_lowercase();
    match lower.as_str() {
        "won't" => return "will",
        "can't" => return "can",
        "shan't" => return "shall",
        _ => {}
    }

    for suffix in ["n't", "'re", "'ve", "'ll", "'m", "'d", "'s"] {
        if lower.ends_with(suffix) && word.len() > suffix.len() {
            return &word[..word.len() - suffix.len()];
        }
    }
    word
}

/// Marks the first word of the text and the first word after each
/// punctuation token containing `.`, `!`, or `?`.
fn mark_sentence_first(tokens: &mut [Token]) {
    let mut expect_first = true;
    for token in tokens {
        if token.is_filtered {
            if token.original.contains(['.', '!', '?']) {
                expect_first = true;
            }
            continue;
        }
        if expect_first {
            token.is_first = true;
            expect_first = false;
        }
    }
}

fn starts_uppercase(s: &str) -> bool {
    s.bytes().next().is_some_and(|b| b.is_ascii_uppercase())
}

fn is_acronym(s: &str) -> bool {
    s.len() > 1 && s.bytes().all(|b| b.is_ascii_uppercase())
}

const fn is_name_candidate(token: &Token) -> bool {
    !token.is_filtered && !token.is_stopword
}

/// Two passes: acronyms and capitalized non-initial words first, then every
/// member of a run of two or more capitalized non-initial words.
fn mark_proper_nouns(tokens: &mut [Token]) {
    for token in tokens.iter_mut().filter(|t| is_name_candidate(t)) {
        if is_acronym(&token.original) || (!token.is_first && starts_uppercase(&token.original)) {
            token.is_proper = true;
        }
    }

    let in_run = |t: &Token| is_name_candidate(t) && !t.is_first && starts_uppercase(&t.original);
    let mut i = 0;
    while i < tokens.len() {
        if !in_run(&tokens[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < tokens.len() && in_run(&tokens[i]) {
            i += 1;
        }
        if i - start > 1 {
            for token in &mut tokens[start..i] {
                token.is_proper = true;
            }
        }
    }
}
