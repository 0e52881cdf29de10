//! Report types returned by the scorers and by [`assess`](crate::assess()).
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so the CLI
//! can print them as JSON and the MCP server can describe them.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::level::CefrLevel;

/// Distribution bucket for content words found in no reference list.
pub const UNKNOWN_BUCKET: &str = "Unknown";

/// Vocabulary sophistication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VocabularyReport {
    /// Sub-score on the 1.0–6.0 scale.
    pub score: f64,
    /// Fraction of unique content words per level label, plus `"Unknown"`.
    /// Empty buckets are omitted.
    pub distribution: BTreeMap<String, f64>,
    /// Fraction of unique content words found in no list.
    pub unknown_ratio: f64,
    /// Number of unique content words.
    pub content_words: usize,
}

impl Default for VocabularyReport {
    fn default() -> Self {
        Self {
            score: 1.0,
            distribution: BTreeMap::new(),
            unknown_ratio: 0.0,
            content_words: 0,
        }
    }
}

/// Syntactic complexity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SyntaxReport {
    /// Sub-score on the 1.0–6.0 scale.
    pub score: f64,
    /// Words per sentence.
    pub avg_sentence_length: f64,
    /// Subordinators and relative pronouns per sentence.
    pub subordination_index: f64,
    /// Passive constructions per sentence.
    pub passive_rate: f64,
    /// Distinct connector categories used.
    pub connector_diversity: usize,
}

impl Default for SyntaxReport {
    fn default() -> Self {
        Self {
            score: 1.0,
            avg_sentence_length: 0.0,
            subordination_index: 0.0,
            passive_rate: 0.0,
            connector_diversity: 0,
        }
    }
}

/// Classic readability formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    /// Sub-score on the 1.0–6.0 scale.
    pub score: f64,
    /// Flesch-Kincaid Grade Level.
    pub fkgl: f64,
    /// Flesch Reading Ease.
    pub fre: f64,
    /// Coleman-Liau Index.
    pub cli: f64,
}

impl Default for ReadabilityReport {
    fn default() -> Self {
        Self {
            score: 1.0,
            fkgl: 0.0,
            fre: 0.0,
            cli: 0.0,
        }
    }
}

/// Result of assessing a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AssessmentReport {
    /// Level label for `score`.
    pub level: CefrLevel,
    /// Weighted score on the 1.0–6.0 scale.
    pub score: f64,
    /// How much to trust the result, 0.0–1.0.
    pub confidence: f64,
    /// Vocabulary sub-score and diagnostics.
    pub vocabulary: VocabularyReport,
    /// Syntax sub-score and diagnostics.
    pub syntax: SyntaxReport,
    /// Readability sub-score and diagnostics.
    pub readability: ReadabilityReport,
    /// Words counted (summed across segments when sampled).
    pub word_count: usize,
    /// Sentences counted (summed across segments when sampled).
    pub sentence_count: usize,
    /// Segments that contributed; 1 when the text was analyzed whole.
    pub segments: usize,
}

impl AssessmentReport {
    /// Whether the assessed level is above `max`.
    pub fn exceeds(&self, max: CefrLevel) -> bool {
        self.level > max
    }
}
