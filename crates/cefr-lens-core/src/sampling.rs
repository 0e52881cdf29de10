//! Long-text sampling and result fusion.
//!
//! Texts above the sampling threshold are not analyzed whole. Instead up to
//! three sentence-aligned excerpts of about [`TARGET_WORDS`] words (beginning,
//! middle, end) are assessed separately and their reports merged.

use std::collections::{BTreeMap, HashSet};
use std::ops::Range;

use crate::level::{CefrLevel, clamp_score};
use crate::lexicon::LexicalStore;
use crate::report::{AssessmentReport, ReadabilityReport, SyntaxReport, VocabularyReport};
use crate::score_config::{ScoreConfig, Weights};
use crate::text::{split_sentences, word_count};

/// Texts shorter than this are never split, whatever the threshold.
pub const MIN_SAMPLED_WORDS: usize = 3000;

/// Words collected per segment.
pub const TARGET_WORDS: usize = 1000;

/// Whether a text of `words` words should be sampled under `config`.
pub const fn should_sample(words: usize, config: &ScoreConfig) -> bool {
    words > config.sampling_threshold && !config.full_analysis
}

/// Extracts the segments to assess.
///
/// Texts under [`MIN_SAMPLED_WORDS`] come back whole as a single segment.
/// Otherwise the result holds one to three non-overlapping runs of whole
/// sentences, each joined with single spaces, in text order. A segment whose
/// trimmed text repeats an earlier one is dropped.
#[tracing::instrument(skip(text, store))]
pub fn sample_text(text: &str, words: usize, store: &dyn LexicalStore) -> Vec<String> {
    if words < MIN_SAMPLED_WORDS {
        return vec![text.to_string()];
    }
    let sentences = split_sentences(text, store);
    if sentences.is_empty() {
        return vec![text.to_string()];
    }

    let lengths: Vec<usize> = sentences.iter().map(|s| word_count(s)).collect();
    let mut seen = HashSet::new();
    let segments: Vec<String> = segment_ranges(&lengths)
        .into_iter()
        .map(|range| sentences[range].join(" ").trim().to_string())
        .filter(|segment| !segment.is_empty() && seen.insert(segment.clone()))
        .collect();
    if segments.is_empty() {
        return vec![text.to_string()];
    }

    tracing::debug!(
        sentences = sentences.len(),
        segments = segments.len(),
        "sampled text"
    );
    segments
}

/// Sentence index ranges for the beginning, middle, and end segments.
///
/// Ranges never overlap. The middle range is omitted when the first and last
/// ranges touch; the last range is empty when the first takes everything.
fn segment_ranges(lengths: &[usize]) -> Vec<Range<usize>> {
    let total = lengths.len();
    let collect_forward = |start: usize, limit: usize| {
        let mut end = start;
        let mut words = 0;
        while end < limit && words < TARGET_WORDS {
            words += lengths[end];
            end += 1;
        }
        end
    };

    let first_end = collect_forward(0, total);

    let mut last_start = total;
    let mut words = 0;
    while last_start > 0 && words < TARGET_WORDS {
        last_start -= 1;
        words += lengths[last_start];
    }
    let last_start = last_start.max(first_end);

    let gap = last_start - first_end;
    if gap == 0 {
        return vec![0..first_end, last_start..total];
    }

    let mut middle_start = first_end + gap / 2;
    let mut lead_in = 0;
    while middle_start > first_end && lead_in < TARGET_WORDS / 2 {
        middle_start -= 1;
        lead_in += lengths[middle_start];
    }
    let middle_end = collect_forward(middle_start, last_start);

    vec![0..first_end, middle_start..middle_end, last_start..total]
}

/// Population variance of the segment scores.
pub fn sampled_variance(scores: &[f64]) -> f64 {
    if scores.len() <= 1 {
        return 0.0;
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n
}

fn mean(values: impl Iterator<Item = f64>, n: f64) -> f64 {
    values.sum::<f64>() / n
}

/// Merges per-segment reports into one.
///
/// Sub-scores and metrics are averaged, counts are summed, and the final
/// score is recomputed from the averaged sub-scores with `weights`. A single
/// report is returned unchanged; an empty slice yields `None`. Confidence is
/// left for the caller to fill in.
pub fn merge(reports: &[AssessmentReport], weights: &Weights) -> Option<AssessmentReport> {
    match reports {
        [] => return None,
        [only] => return Some(only.clone()),
        _ => {}
    }
    let n = reports.len() as f64;

    let mut distribution: BTreeMap<String, f64> = BTreeMap::new();
    for report in reports {
        for (bucket, fraction) in &report.vocabulary.distribution {
            *distribution.entry(bucket.clone()).or_default() += fraction;
        }
    }
    for fraction in distribution.values_mut() {
        *fraction /= n;
    }

    let vocabulary = VocabularyReport {
        score: mean(reports.iter().map(|r| r.vocabulary.score), n),
        distribution,
        unknown_ratio: mean(reports.iter().map(|r| r.vocabulary.unknown_ratio), n),
        content_words: reports.iter().map(|r| r.vocabulary.content_words).sum(),
    };

    let connectors: usize = reports.iter().map(|r| r.syntax.connector_diversity).sum();
    let syntax = SyntaxReport {
        score: mean(reports.iter().map(|r| r.syntax.score), n),
        avg_sentence_length: mean(reports.iter().map(|r| r.syntax.avg_sentence_length), n),
        subordination_index: mean(reports.iter().map(|r| r.syntax.subordination_index), n),
        passive_rate: mean(reports.iter().map(|r| r.syntax.passive_rate), n),
        connector_diversity: (connectors as f64 / n).round() as usize,
    };

    let readability = ReadabilityReport {
        score: mean(reports.iter().map(|r| r.readability.score), n),
        fkgl: mean(reports.iter().map(|r| r.readability.fkgl), n),
        fre: mean(reports.iter().map(|r| r.readability.fre), n),
        cli: mean(reports.iter().map(|r| r.readability.cli), n),
    };

    let score = clamp_score(weights.combine(vocabulary.score, syntax.score, readability.score));
    Some(AssessmentReport {
        level: CefrLevel::from_score(score),
        score,
        confidence: 0.0,
        vocabulary,
        syntax,
        readability,
        word_count: reports.iter().map(|r| r.word_count).sum(),
        sentence_count: reports.iter().map(|r| r.sentence_count).sum(),
        segments: reports.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon;

    fn store() -> &'static lexicon::Lexicon {
        lexicon::initialize().expect("embedded lexicon should load")
    }

    const SUBJECTS: [&str; 5] = [
        "The student",
        "My neighbour",
        "A farmer",
        "Our teacher",
        "The doctor",
    ];
    const VERBS: [&str; 4] = ["reads", "writes", "carries", "finds"];
    const OBJECTS: [&str; 3] = ["a long letter", "an old book", "the heavy box"];

    /// About `sentences * 8` words of varied sentences.
    fn long_text(sentences: usize) -> String {
        (0..sentences)
            .map(|i| {
                format!(
                    "{} {} {} every morning.",
                    SUBJECTS[i % SUBJECTS.len()],
                    VERBS[i % VERBS.len()],
                    OBJECTS[i % OBJECTS.len()],
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn sampling_decision() {
        let config = ScoreConfig::default();
        assert!(!should_sample(10_000, &config));
        assert!(should_sample(10_001, &config));
        assert!(!should_sample(10_001, &config.with_full_analysis()));
        assert!(should_sample(600, &config.with_sampling_threshold(500)));
    }

    #[test]
    fn short_text_is_one_segment() {
        let text = long_text(300);
        let words = word_count(&text);
        assert!(words < MIN_SAMPLED_WORDS);
        assert_eq!(sample_text(&text, words, store()), vec![text]);
    }

    #[test]
    fn long_text_yields_three_segments() {
        let text = long_text(750);
        let words = word_count(&text);
        assert!((5500..=6500).contains(&words), "{words}");

        let segments = sample_text(&text, words, store());
        assert_eq!(segments.len(), 3);
        for segment in &segments {
            let count = word_count(segment);
            assert!((500..=1500).contains(&count), "segment of {count} words");
            assert!(segment.ends_with('.'));
            assert!(text.contains(segment.as_str()));
        }
        assert!(text.starts_with(segments[0].as_str()));
        assert!(text.ends_with(segments[2].as_str()));
    }

    #[test]
    fn segments_never_repeat_text() {
        let alpha = vec!["alpha"; 1999].join(" ") + " alpha.";
        let beta = vec!["beta"; 1999].join(" ") + " beta.";
        let text = format!("{alpha} {beta}");
        let segments = sample_text(&text, word_count(&text), store());
        assert_eq!(segments, vec![alpha, beta]);
    }

    #[test]
    fn identical_halves_collapse_to_one_segment() {
        let half = vec!["alpha"; 1999].join(" ") + " alpha.";
        let text = format!("{half} {half}");
        let segments = sample_text(&text, word_count(&text), store());
        assert_eq!(segments, vec![half]);
    }

    #[test]
    fn repetitive_text_yields_distinct_segments() {
        let text = vec!["The dog runs to the park and plays with a red ball."; 600].join(" ");
        let segments = sample_text(&text, word_count(&text), store());
        assert_eq!(segments.len(), 1);
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn one_huge_sentence_is_one_segment() {
        let text = vec!["word"; 3500].join(" ") + ".";
        let segments = sample_text(&text, 3500, store());
        assert_eq!(segments, vec![text]);
    }

    #[test]
    fn ranges_are_disjoint_and_ordered() {
        let lengths = vec![10; 600];
        let ranges = segment_ranges(&lengths);
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0], 0..100);
        assert_eq!(ranges[1], 250..350);
        assert_eq!(ranges[2], 500..600);
    }

    #[test]
    fn variance() {
        assert_eq!(sampled_variance(&[]), 0.0);
        assert_eq!(sampled_variance(&[3.0]), 0.0);
        assert!((sampled_variance(&[2.0, 4.0]) - 1.0).abs() < 1e-9);
        assert_eq!(sampled_variance(&[2.5, 2.5, 2.5]), 0.0);
    }

    fn report(vocab: f64, syntax: f64, readability: f64, connectors: usize) -> AssessmentReport {
        let score = Weights::default().combine(vocab, syntax, readability);
        AssessmentReport {
            level: CefrLevel::from_score(score),
            score,
            confidence: 0.9,
            vocabulary: VocabularyReport {
                score: vocab,
                distribution: BTreeMap::from([("A1".to_string(), 1.0)]),
                unknown_ratio: 0.0,
                content_words: 10,
            },
            syntax: SyntaxReport {
                score: syntax,
                connector_diversity: connectors,
                ..SyntaxReport::default()
            },
            readability: ReadabilityReport {
                score: readability,
                ..ReadabilityReport::default()
            },
            word_count: 1000,
            sentence_count: 50,
            segments: 1,
        }
    }

    #[test]
    fn merge_single_is_identity() {
        let one = report(2.0, 3.0, 4.0, 2);
        assert_eq!(merge(std::slice::from_ref(&one), &Weights::default()), Some(one));
        assert_eq!(merge(&[], &Weights::default()), None);
    }

    #[test]
    fn merge_averages_scores_and_sums_counts() {
        let mut second = report(4.0, 3.0, 2.0, 3);
        second.vocabulary.distribution =
            BTreeMap::from([("B2".to_string(), 0.5), ("Unknown".to_string(), 0.5)]);
        let merged = merge(&[report(2.0, 3.0, 4.0, 2), second], &Weights::default())
            .expect("two reports merge");

        assert!((merged.vocabulary.score - 3.0).abs() < 1e-9);
        assert!((merged.syntax.score - 3.0).abs() < 1e-9);
        assert!((merged.readability.score - 3.0).abs() < 1e-9);
        assert!((merged.score - 3.0).abs() < 1e-9);
        assert_eq!(merged.level, CefrLevel::B1);
        assert_eq!(merged.syntax.connector_diversity, 3);
        assert_eq!(merged.word_count, 2000);
        assert_eq!(merged.sentence_count, 100);
        assert_eq!(merged.vocabulary.content_words, 20);
        assert_eq!(merged.segments, 2);
        assert!((merged.vocabulary.distribution["A1"] - 0.5).abs() < 1e-9);
        assert!((merged.vocabulary.distribution["B2"] - 0.25).abs() < 1e-9);
        let sum: f64 = merged.vocabulary.distribution.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn merge_uses_caller_weights() {
        let weights = Weights {
            vocabulary: 1.0,
            syntax: 0.0,
            readability: 0.0,
        };
        let merged = merge(&[report(5.0, 1.0, 1.0, 0), report(6.0, 1.0, 1.0, 0)], &weights)
            .expect("two reports merge");
        assert!((merged.score - 5.5).abs() < 1e-9);
        assert_eq!(merged.level, CefrLevel::C2);
    }
}
