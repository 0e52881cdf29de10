//! The assessment pipeline: segment, score, fuse, and (for long texts)
//! sample and merge.

use crate::error::{AssessError, AssessResult};
use crate::level::{CefrLevel, clamp_score};
use crate::lexicon::{self, LexicalStore};
use crate::readability::score_readability;
use crate::report::AssessmentReport;
use crate::sampling::{merge, sample_text, sampled_variance, should_sample};
use crate::score_config::ScoreConfig;
use crate::syntax::score_syntax;
use crate::text::{split_sentences, tokenize, word_count};
use crate::vocabulary::score_vocabulary;

/// Word count at which the length factor of confidence saturates.
const CONFIDENT_WORDS: f64 = 500.0;

/// Assesses `text` against the process-wide lexicon.
///
/// # Errors
///
/// - [`AssessError::EmptyInput`] if the text is blank.
/// - [`AssessError::NoEnglishContent`] if it has no ASCII letters.
/// - [`AssessError::LexicalStoreUnavailable`] if the embedded word lists
///   failed to load.
/// - [`AssessError::NoContentWords`] if nothing in it is a content word.
/// - [`AssessError::AllSegmentsFailed`] if every sampled segment of a long
///   text lacked content words.
///
/// # Example
///
/// ```
/// use cefr_lens_core::{CefrLevel, ScoreConfig, assess};
///
/// let report = assess("The cat sat on the mat. It was a good day.", &ScoreConfig::default())?;
/// assert_eq!(report.level, CefrLevel::A1);
/// assert_eq!(report.sentence_count, 2);
/// # Ok::<(), cefr_lens_core::AssessError>(())
/// ```
pub fn assess(text: &str, config: &ScoreConfig) -> AssessResult<AssessmentReport> {
    let text = validate(text)?;
    let store = lexicon::initialize()?;
    run(text, config, store)
}

/// Assesses `text` against a caller-supplied lexical store.
///
/// # Errors
///
/// As [`assess`], except that store initialization is the caller's concern.
pub fn assess_with(
    text: &str,
    config: &ScoreConfig,
    store: &dyn LexicalStore,
) -> AssessResult<AssessmentReport> {
    let text = validate(text)?;
    run(text, config, store)
}

/// Confidence from total word count and inter-segment score variance.
///
/// The length factor grows linearly to 1.0 at 500 words; the consistency
/// factor drops linearly to 0.0 at a variance of 1.0.
pub fn confidence(words: usize, variance: f64) -> f64 {
    let length = (words as f64 / CONFIDENT_WORDS).min(1.0);
    let consistency = (1.0 - variance).max(0.0);
    (length * consistency).clamp(0.0, 1.0)
}

fn validate(text: &str) -> AssessResult<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AssessError::EmptyInput);
    }
    if !text.bytes().any(|b| b.is_ascii_alphabetic()) {
        return Err(AssessError::NoEnglishContent);
    }
    Ok(text)
}

#[tracing::instrument(skip_all, fields(text_len = text.len()))]
fn run(
    text: &str,
    config: &ScoreConfig,
    store: &dyn LexicalStore,
) -> AssessResult<AssessmentReport> {
    let words = word_count(text);
    if !should_sample(words, config) {
        let mut report = assess_segment(text, config, store)?;
        report.confidence = confidence(report.word_count, 0.0);
        return Ok(report);
    }

    let segments = sample_text(text, words, store);
    let mut reports = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        match assess_segment(segment, config, store) {
            Ok(report) => reports.push(report),
            Err(AssessError::NoContentWords) => {
                tracing::debug!(segment = index, "dropping segment without content words");
            }
            Err(err) => return Err(err),
        }
    }

    let scores: Vec<f64> = reports.iter().map(|r| r.score).collect();
    let mut merged = merge(&reports, &config.weights).ok_or(AssessError::AllSegmentsFailed)?;
    merged.confidence = confidence(merged.word_count, sampled_variance(&scores));
    tracing::info!(
        segments = reports.len(),
        level = %merged.level,
        score = merged.score,
        "assessed sampled text"
    );
    Ok(merged)
}

/// Runs the whole pipeline on one text without sampling. Confidence is left
/// at zero.
fn assess_segment(
    text: &str,
    config: &ScoreConfig,
    store: &dyn LexicalStore,
) -> AssessResult<AssessmentReport> {
    let sentences = split_sentences(text, store);
    let tokens = tokenize(text, store);
    if !tokens.iter().any(|t| t.is_content()) {
        return Err(AssessError::NoContentWords);
    }

    let word_count = tokens.iter().filter(|t| !t.is_filtered).count().max(1);
    let sentence_count = sentences.len().max(1);

    let vocabulary = score_vocabulary(&tokens, store);
    let syntax = score_syntax(&tokens, &sentences, store);
    let readability = score_readability(&tokens, sentence_count);

    let score = clamp_score(config.weights.combine(
        vocabulary.score,
        syntax.score,
        readability.score,
    ));

    Ok(AssessmentReport {
        level: CefrLevel::from_score(score),
        score,
        confidence: 0.0,
        vocabulary,
        syntax,
        readability,
        word_count,
        sentence_count,
        segments: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{Lexicon, LexiconSources, WordList};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn simple_text() {
        let report = assess(
            "The cat sat on the mat. It was a good day.",
            &ScoreConfig::default(),
        )
        .expect("simple text assesses");
        assert_eq!(report.level, CefrLevel::A1);
        assert!(approx(report.score, 1.4));
        assert!(approx(report.vocabulary.score, 1.8));
        assert!(approx(report.syntax.score, 1.0));
        assert!(approx(report.readability.score, 1.0));
        assert_eq!(report.word_count, 11);
        assert_eq!(report.sentence_count, 2);
        assert_eq!(report.segments, 1);
        assert!(approx(report.confidence, 11.0 / 500.0));
    }

    #[test]
    fn input_errors() {
        let config = ScoreConfig::default();
        assert_eq!(assess("", &config), Err(AssessError::EmptyInput));
        assert_eq!(assess("  \n\t", &config), Err(AssessError::EmptyInput));
        assert_eq!(assess("12345 !!!", &config), Err(AssessError::NoEnglishContent));
        assert_eq!(assess("你好世界", &config), Err(AssessError::NoEnglishContent));
        assert_eq!(assess("the a is in on", &config), Err(AssessError::NoContentWords));
        assert_eq!(assess("NASA FBI", &config), Err(AssessError::NoContentWords));
    }

    #[test]
    fn weights_change_the_score() {
        let text = "Researchers analysed the hypothesis with rigorous methodology.";
        let vocab_only = ScoreConfig::default().with_weights(1.0, 0.0, 0.0);
        let report = assess(text, &vocab_only).expect("assesses");
        assert!(approx(report.score, report.vocabulary.score));
    }

    #[test]
    fn confidence_bounds() {
        assert_eq!(confidence(0, 0.0), 0.0);
        assert!(approx(confidence(250, 0.0), 0.5));
        assert_eq!(confidence(5000, 0.0), 1.0);
        assert!(approx(confidence(5000, 0.25), 0.75));
        assert_eq!(confidence(5000, 3.0), 0.0);
        assert!(confidence(100, 0.1) <= confidence(200, 0.1));
        assert!(confidence(800, 0.5) <= confidence(800, 0.2));
    }

    fn sampled_text() -> String {
        let easy = "The dog runs to the park and plays with a red ball. ".repeat(200);
        let hard = "Consequently, the committee's deliberations, which were protracted, \
                    necessitated comprehensive reconsideration of fundamental assumptions. "
            .repeat(150);
        format!("{easy}{hard}{easy}")
    }

    #[test]
    fn long_text_is_sampled() {
        let text = sampled_text();
        let config = ScoreConfig::default().with_sampling_threshold(3000);
        let report = assess(&text, &config).expect("long text assesses");
        assert_eq!(report.segments, 3);
        assert!(report.confidence < 1.0);
        assert!(report.confidence >= 0.0);
        assert!(report.word_count < word_count(&text));
        assert_eq!(report.level, CefrLevel::from_score(report.score));

        let full = assess(&text, &config.with_full_analysis()).expect("full analysis");
        assert_eq!(full.segments, 1);
    }

    #[test]
    fn segments_without_content_are_dropped() {
        let filler = "It is. ".repeat(1000);
        let content = "The farmer grows wheat and barley near the river. ".repeat(150);
        let text = format!("{filler}{content}");
        let config = ScoreConfig::default().with_sampling_threshold(100);
        let report = assess(&text, &config).expect("content segments survive");
        assert_eq!(report.segments, 2);

        let empty = "It is. ".repeat(1600);
        assert_eq!(assess(&empty, &config), Err(AssessError::AllSegmentsFailed));
    }

    #[test]
    fn custom_store() {
        let lexicon = Lexicon::from_sources(&LexiconSources {
            oxford: "cat,c1\nmat,c1\nsat,c1\ngood,c1\nday,c1\n",
            ..LexiconSources::EMBEDDED
        })
        .expect("custom lexicon builds");
        assert_eq!(lexicon.level_of(WordList::Oxford, "cat"), Some(CefrLevel::C1));

        let report = assess_with(
            "The cat sat on the mat. It was a good day.",
            &ScoreConfig::default(),
            &lexicon,
        )
        .expect("assesses with custom store");
        assert!(report.vocabulary.score > 4.0);
        assert_eq!(report.vocabulary.unknown_ratio, 0.0);
    }

    #[test]
    fn concurrent_calls_agree() {
        let text = "Although it rained, the children played outside because they were bored.";
        let expected = assess(text, &ScoreConfig::default()).expect("assesses");
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(move || assess(text, &ScoreConfig::default())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(expected.clone()));
        }
    }
}
