//! Readability scoring with three classic formulas.
//!
//! - Flesch-Kincaid Grade Level: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//! - Flesch Reading Ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//! - Coleman-Liau Index: `0.0588 * L - 0.296 * S - 15.8`, with `L` letters and
//!   `S` sentences per 100 words
//!
//! Each is mapped to the CEFR scale through its anchor table and the three
//! are blended 50/30/20.

use crate::anchors::{self, interpolate};
use crate::report::ReadabilityReport;
use crate::syllables::count_syllables;
use crate::text::Token;

const FKGL_WEIGHT: f64 = 0.50;
const FRE_WEIGHT: f64 = 0.30;
const CLI_WEIGHT: f64 = 0.20;

/// Flesch-Kincaid Grade Level.
pub fn fkgl(words: usize, sentences: usize, syllables: usize) -> f64 {
    let (w, s, syl) = (words as f64, sentences as f64, syllables as f64);
    0.39f64.mul_add(w / s, 11.8 * (syl / w)) - 15.59
}

/// Flesch Reading Ease.
pub fn fre(words: usize, sentences: usize, syllables: usize) -> f64 {
    let (w, s, syl) = (words as f64, sentences as f64, syllables as f64);
    1.015f64.mul_add(-(w / s), 206.835) - 84.6 * (syl / w)
}

/// Coleman-Liau Index.
pub fn cli(characters: usize, words: usize, sentences: usize) -> f64 {
    let w = words as f64;
    let letters = characters as f64 / w * 100.0;
    let sentences = sentences as f64 / w * 100.0;
    0.0588f64.mul_add(letters, -0.296 * sentences) - 15.8
}

/// Scores precomputed counts.
///
/// Zero words or zero sentences yield the default report (score 1.0).
pub fn score_counts(
    words: usize,
    sentences: usize,
    syllables: usize,
    characters: usize,
) -> ReadabilityReport {
    if words == 0 || sentences == 0 {
        return ReadabilityReport::default();
    }

    let fkgl = fkgl(words, sentences, syllables);
    let fre = fre(words, sentences, syllables);
    let cli = cli(characters, words, sentences);

    let score = FKGL_WEIGHT * interpolate(&anchors::GRADE_LEVEL, fkgl)
        + FRE_WEIGHT * interpolate(&anchors::READING_EASE, fre)
        + CLI_WEIGHT * interpolate(&anchors::GRADE_LEVEL, cli);

    ReadabilityReport {
        score,
        fkgl,
        fre,
        cli,
    }
}

/// Scores the non-filtered tokens of a text split into `sentences` sentences.
#[tracing::instrument(skip(tokens), fields(tokens = tokens.len()))]
pub fn score_readability(tokens: &[Token], sentences: usize) -> ReadabilityReport {
    let (words, syllables, characters) = tokens
        .iter()
        .filter(|t| !t.is_filtered)
        .fold((0, 0, 0), |(w, syl, ch), t| {
            (w + 1, syl + count_syllables(&t.lower), ch + t.lower.len())
        });

    let report = score_counts(words, sentences, syllables, characters);
    tracing::debug!(
        words,
        syllables,
        characters,
        fkgl = report.fkgl,
        fre = report.fre,
        cli = report.cli,
        score = report.score,
        "readability scored"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon;
    use crate::text::{split_sentences, tokenize};

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn formula_values() {
        assert!(close(fkgl(100, 5, 150), 9.91, 0.01));
        assert!(close(fkgl(100, 10, 140), 4.83, 0.01));
        assert!(close(fre(100, 5, 150), 59.635, 0.01));
        assert!(close(fre(100, 10, 140), 78.245, 0.01));
        assert!(close(cli(400, 100, 5), 6.24, 0.01));
        assert!(close(cli(350, 100, 10), 1.82, 0.01));
    }

    #[test]
    fn composite_from_counts() {
        let report = score_counts(100, 5, 150, 400);
        let expected = 0.50 * (0.91 / 3.0 + 4.0) + 0.30 * 4.5365 + 0.20 * (0.24 / 3.0 + 3.0);
        assert!(close(report.score, expected, 0.01), "{}", report.score);
        assert!(close(report.fkgl, 9.91, 0.01));
    }

    #[test]
    fn zero_counts_score_minimum() {
        assert_eq!(score_counts(0, 3, 0, 0), ReadabilityReport::default());
        assert_eq!(score_counts(10, 0, 12, 40), ReadabilityReport::default());
    }

    #[test]
    fn easy_text_scores_low() {
        let store = lexicon::initialize().expect("embedded lexicon should load");
        let text = "The cat sat on the mat. It was a good day.";
        let report = score_readability(&tokenize(text, store), split_sentences(text, store).len());
        assert!(close(report.score, 1.0, 1e-9), "{report:?}");
        assert!(report.fre > 95.0);
    }

    #[test]
    fn punctuation_is_not_counted() {
        let store = lexicon::initialize().expect("embedded lexicon should load");
        let plain = score_readability(&tokenize("Big dogs run fast.", store), 1);
        let noisy = score_readability(&tokenize("Big -- dogs, run (fast)!!", store), 1);
        assert_eq!(plain, noisy);
    }
}
