//! Syntactic complexity scoring.
//!
//! Four lexical proxies for sentence structure, each mapped to a sub-score
//! through its anchor table and then combined.

use std::collections::HashSet;

use crate::anchors::{self, interpolate};
use crate::lexicon::LexicalStore;
use crate::report::SyntaxReport;
use crate::text::{Token, sentence_words};
use crate::word_lists::{BE_VERBS, CONNECTORS, SUBORDINATORS};

const SENTENCE_LENGTH_WEIGHT: f64 = 0.40;
const SUBORDINATION_WEIGHT: f64 = 0.30;
const PASSIVE_WEIGHT: f64 = 0.15;
const CONNECTOR_WEIGHT: f64 = 0.15;

/// Scores sentence structure from the token and sentence views of a text.
///
/// Returns the default report (score 1.0, all metrics zero) when there are no
/// words or no sentences.
#[tracing::instrument(skip_all, fields(tokens = tokens.len(), sentences = sentences.len()))]
pub fn score_syntax(
    tokens: &[Token],
    sentences: &[String],
    store: &dyn LexicalStore,
) -> SyntaxReport {
    let words: Vec<&Token> = tokens.iter().filter(|t| !t.is_filtered).collect();
    if words.is_empty() || sentences.is_empty() {
        return SyntaxReport::default();
    }
    let sentence_count = sentences.len() as f64;

    let avg_sentence_length = words.len() as f64 / sentence_count;
    let subordinators = words
        .iter()
        .filter(|t| SUBORDINATORS.contains(t.lower.as_str()))
        .count();
    let subordination_index = subordinators as f64 / sentence_count;
    let passive_rate = passive_count(sentences, store) as f64 / sentence_count;
    let connector_diversity = words
        .iter()
        .filter_map(|t| CONNECTORS.get(t.lower.as_str()))
        .collect::<HashSet<_>>()
        .len();

    let score = SENTENCE_LENGTH_WEIGHT * interpolate(&anchors::SENTENCE_LENGTH, avg_sentence_length)
        + SUBORDINATION_WEIGHT * interpolate(&anchors::SUBORDINATION, subordination_index)
        + PASSIVE_WEIGHT * interpolate(&anchors::PASSIVE_RATE, passive_rate)
        + CONNECTOR_WEIGHT * interpolate(&anchors::CONNECTOR_DIVERSITY, connector_diversity as f64);

    tracing::debug!(
        avg_sentence_length,
        subordination_index,
        passive_rate,
        connector_diversity,
        score,
        "syntax scored"
    );
    SyntaxReport {
        score,
        avg_sentence_length,
        subordination_index,
        passive_rate,
        connector_diversity,
    }
}

/// Be-verb + past-participle bigrams across all sentences.
fn passive_count(sentences: &[String], store: &dyn LexicalStore) -> usize {
    sentences
        .iter()
        .map(|sentence| {
            sentence_words(sentence)
                .windows(2)
                .filter(|pair| {
                    BE_VERBS.contains(pair[0].as_str()) && is_past_participle(&pair[1], store)
                })
                .count()
        })
        .sum()
}

/// Irregular participle, or a regular `-ed` form.
pub fn is_past_participle(word: &str, store: &dyn LexicalStore) -> bool {
    store.is_past_participle(word) || (word.ends_with("ed") && !word.ends_with("ing"))
}
