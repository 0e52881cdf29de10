//! Vocabulary sophistication scoring.
//!
//! Each unique content word is looked up in the reference lists (surface form
//! first, then its lemma). Short texts score the mean level; longer ones the
//! 80th percentile, so a handful of hard words can't dominate. A high share of
//! unknown words pushes the score up.

use std::collections::{BTreeMap, HashSet};

use crate::level::{CefrLevel, clamp_score};
use crate::lemma::lemmatize;
use crate::lexicon::{LexicalStore, WordList};
use crate::report::{UNKNOWN_BUCKET, VocabularyReport};
use crate::text::Token;

/// Below this many content words the mean is used instead of the percentile.
const PERCENTILE_MIN_WORDS: usize = 10;
const PERCENTILE: f64 = 0.8;
/// Unknown ratio above which the score is corrected upward.
const UNKNOWN_TOLERANCE: f64 = 0.3;
const UNKNOWN_PENALTY: f64 = 2.0;

/// Level of `word` in the first list that has it, trying the lemma when the
/// surface form is unlisted.
pub fn word_level(word: &str, store: &dyn LexicalStore) -> Option<CefrLevel> {
    if word.is_empty() {
        return None;
    }
    lookup(word, store).or_else(|| {
        let lemma = lemmatize(word, store);
        (lemma != word).then(|| lookup(&lemma, store)).flatten()
    })
}

fn lookup(word: &str, store: &dyn LexicalStore) -> Option<CefrLevel> {
    WordList::LOOKUP_ORDER
        .iter()
        .find_map(|list| store.level_of(*list, word))
}

/// Scores the content words among `tokens`.
#[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
pub fn score_vocabulary(tokens: &[Token], store: &dyn LexicalStore) -> VocabularyReport {
    let mut seen = HashSet::new();
    let mut ranks: Vec<u8> = Vec::new();
    let mut counts = [0usize; 6];
    let mut unknown = 0usize;

    for token in tokens.iter().filter(|t| t.is_content()) {
        if !seen.insert(token.lower.as_str()) {
            continue;
        }
        if let Some(level) = word_level(&token.lower, store) {
            ranks.push(level.rank());
            counts[usize::from(level.rank() - 1)] += 1;
        } else {
            unknown += 1;
            ranks.push(CefrLevel::C1.rank());
        }
    }

    let content_words = ranks.len();
    if content_words == 0 {
        return VocabularyReport::default();
    }

    let total = content_words as f64;
    let unknown_ratio = unknown as f64 / total;

    let mut distribution: BTreeMap<String, f64> = CefrLevel::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(level, count)| (level.as_str().to_string(), count as f64 / total))
        .collect();
    if unknown > 0 {
        distribution.insert(UNKNOWN_BUCKET.to_string(), unknown_ratio);
    }

    ranks.sort_unstable();
    let mut score = if content_words < PERCENTILE_MIN_WORDS {
        ranks.iter().map(|r| f64::from(*r)).sum::<f64>() / total
    } else {
        let index = ((content_words - 1) as f64 * PERCENTILE) as usize;
        f64::from(ranks[index])
    };
    if unknown_ratio > UNKNOWN_TOLERANCE {
        score += (unknown_ratio - UNKNOWN_TOLERANCE) * UNKNOWN_PENALTY;
    }

    tracing::debug!(content_words, unknown, score, "vocabulary scored");
    VocabularyReport {
        score: clamp_score(score),
        distribution,
        unknown_ratio,
        content_words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon;
    use crate::text::tokenize;

    fn store() -> &'static lexicon::Lexicon {
        lexicon::initialize().expect("embedded lexicon should load")
    }

    fn score(text: &str) -> VocabularyReport {
        score_vocabulary(&tokenize(text, store()), store())
    }

    #[test]
    fn word_levels_follow_list_priority() {
        assert_eq!(word_level("cat", store()), Some(CefrLevel::A1));
        assert_eq!(word_level("cats", store()), Some(CefrLevel::A1));
        assert_eq!(word_level("xyzabc", store()), None);
        assert_eq!(word_level("", store()), None);
    }

    #[test]
    fn simple_sentence() {
        let report = score("The cat sat on the mat. It was a good day.");
        assert_eq!(report.content_words, 5);
        assert!((report.score - 1.8).abs() < 1e-9);
        assert!((report.distribution["A1"] - 0.8).abs() < 1e-9);
        assert!((report.distribution[UNKNOWN_BUCKET] - 0.2).abs() < 1e-9);
        assert!((report.unknown_ratio - 0.2).abs() < 1e-9);
    }

    #[test]
    fn no_content_words() {
        let report = score("the a is in on");
        assert_eq!(report, VocabularyReport::default());
        assert_eq!(score(""), VocabularyReport::default());
    }

    #[test]
    fn duplicates_count_once() {
        let report = score("cat cat cat Cat dog");
        assert_eq!(report.content_words, 2);
    }

    #[test]
    fn distribution_sums_to_one() {
        let report = score(
            "Researchers analysed the hypothesis with rigorous methodology and \
             found substantial evidence supporting the flimflam conjecture.",
        );
        let sum: f64 = report.distribution.values().sum();
        assert!((sum - 1.0).abs() < 0.01, "sum = {sum}");
    }

    #[test]
    fn all_unknown_words_are_penalized() {
        let report = score("blorf zint quapple");
        assert_eq!(report.unknown_ratio, 1.0);
        assert!((report.score - 6.0).abs() < 1e-9);
        assert_eq!(report.distribution.len(), 1);
        assert!(!report.distribution.contains_key("C1"));
    }

    #[test]
    fn long_lists_use_percentile() {
        let report = score("cat dog house car book tree water apple table chair");
        assert_eq!(report.content_words, 10);
        assert!(report.score >= 1.0 && report.score <= 2.0);
        assert_eq!(report.score.fract(), 0.0);
    }
}
