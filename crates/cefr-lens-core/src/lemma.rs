//! Rule-based lemmatizer.
//!
//! Irregular forms come from the lexical store. Regular inflections are
//! undone by suffix rules tried in a fixed order; a rule only succeeds when
//! one of its candidate stems is a known vocabulary word.

use crate::lexicon::{LexicalStore, WordList};

type SuffixRule = fn(&str, &dyn LexicalStore) -> Option<String>;

/// Suffix rules in priority order.
const RULES: [SuffixRule; 7] = [
    strip_ing, strip_ed, strip_es, strip_s, strip_er, strip_est, strip_ly,
];

/// Reduces a lowercase word to its base form.
///
/// Returns `word` unchanged when it is already a vocabulary word or when no
/// rule produces a known stem.
///
/// ```
/// use cefr_lens_core::{lemma::lemmatize, lexicon};
///
/// let store = lexicon::initialize().unwrap();
/// assert_eq!(lemmatize("running", store), "run");
/// assert_eq!(lemmatize("children", store), "child");
/// ```
pub fn lemmatize(word: &str, store: &dyn LexicalStore) -> String {
    if word.is_empty() {
        return String::new();
    }
    if let Some(lemma) = store.lemma_of(word) {
        return lemma.to_string();
    }
    if in_vocabulary(store, word) {
        return word.to_string();
    }
    RULES
        .iter()
        .find_map(|rule| rule(word, store))
        .unwrap_or_else(|| word.to_string())
}

/// Whether `word` is in the leveled list or the general frequency list.
fn in_vocabulary(store: &dyn LexicalStore, word: &str) -> bool {
    store.level_of(WordList::Oxford, word).is_some()
        || store.level_of(WordList::General, word).is_some()
}

/// Ends in two identical consonants (`runn`, `bigg`).
fn has_doubled_consonant(stem: &str) -> bool {
    match stem.as_bytes() {
        [.., a, b] => a == b && is_consonant(*b),
        _ => false,
    }
}

const fn is_consonant(b: u8) -> bool {
    b.is_ascii_lowercase() && !matches!(b, b'a' | b'e' | b'i' | b'o' | b'u' | b'y')
}

/// First candidate that is a vocabulary word.
fn first_known(
    store: &dyn LexicalStore,
    candidates: impl IntoIterator<Item = String>,
) -> Option<String> {
    candidates
        .into_iter()
        .find(|candidate| in_vocabulary(store, candidate))
}

/// `studied` → `study`: replaces an `i`-suffix with `y` when `word` is long enough.
fn y_restored(word: &str, suffix: &str, min_len: usize) -> Option<String> {
    (word.ends_with(suffix) && word.len() >= min_len)
        .then(|| format!("{}y", &word[..word.len() - suffix.len()]))
}

/// Doubled-consonant removal, then silent-`e` restoration, then the bare stem.
fn stem_candidates(stem: &str) -> Vec<String> {
    let mut candidates = Vec::with_capacity(3);
    if has_doubled_consonant(stem) {
        candidates.push(stem[..stem.len() - 1].to_string());
    }
    candidates.push(format!("{stem}e"));
    candidates.push(stem.to_string());
    candidates
}

/// Shared shape of the `-ed`, `-er`, and `-est` rules.
fn strip_with_y(
    word: &str,
    store: &dyn LexicalStore,
    suffix: &str,
    min_len: usize,
    y_suffix: &str,
    y_min_len: usize,
) -> Option<String> {
    if !word.ends_with(suffix) || word.len() < min_len {
        return None;
    }
    let stem = &word[..word.len() - suffix.len()];
    first_known(
        store,
        y_restored(word, y_suffix, y_min_len)
            .into_iter()
            .chain(stem_candidates(stem)),
    )
}

fn strip_ing(word: &str, store: &dyn LexicalStore) -> Option<String> {
    if !word.ends_with("ing") || word.len() < 5 {
        return None;
    }
    first_known(store, stem_candidates(&word[..word.len() - 3]))
}

fn strip_ed(word: &str, store: &dyn LexicalStore) -> Option<String> {
    strip_with_y(word, store, "ed", 4, "ied", 5)
}

fn strip_es(word: &str, store: &dyn LexicalStore) -> Option<String> {
    if !word.ends_with("es") || word.len() < 4 {
        return None;
    }
    let stem = &word[..word.len() - 2];
    let sibilant = ["x", "sh", "ch", "ss", "z"]
        .iter()
        .any(|ending| stem.ends_with(ending));

    let mut candidates: Vec<String> = y_restored(word, "ies", 5).into_iter().collect();
    if sibilant {
        candidates.push(stem.to_string());
    }
    candidates.push(word[..word.len() - 1].to_string());
    first_known(store, candidates)
}

fn strip_s(word: &str, store: &dyn LexicalStore) -> Option<String> {
    if !word.ends_with('s') || word.len() < 3 || word.ends_with("ss") {
        return None;
    }
    first_known(store, [word[..word.len() - 1].to_string()])
}

fn strip_er(word: &str, store: &dyn LexicalStore) -> Option<String> {
    strip_with_y(word, store, "er", 4, "ier", 5)
}

fn strip_est(word: &str, store: &dyn LexicalStore) -> Option<String> {
    strip_with_y(word, store, "est", 5, "iest", 6)
}

fn strip_ly(word: &str, store: &dyn LexicalStore) -> Option<String> {
    if !word.ends_with("ly") || word.len() < 4 {
        return None;
    }
    first_known(
        store,
        y_restored(word, "ily", 5)
            .into_iter()
            .chain([word[..word.len() - 2].to_string()]),
    )
}
