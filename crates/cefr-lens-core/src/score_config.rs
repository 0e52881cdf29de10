//! Per-call scoring parameters.
//!
//! Options are validated one at a time. An invalid option is ignored and the
//! previous value stays in place, so a bad weight triple can never leave the
//! configuration half-updated.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default word count above which long texts are sampled.
pub const DEFAULT_SAMPLING_THRESHOLD: usize = 10_000;

/// Allowed distance of the weight sum from 1.0.
pub const WEIGHT_TOLERANCE: f64 = 0.001;

/// Relative weights of the three sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Weights {
    /// Vocabulary weight.
    pub vocabulary: f64,
    /// Syntax weight.
    pub syntax: f64,
    /// Readability weight.
    pub readability: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            vocabulary: 0.50,
            syntax: 0.30,
            readability: 0.20,
        }
    }
}

impl Weights {
    /// Whether every weight is non-negative and the sum is 1.0 within
    /// [`WEIGHT_TOLERANCE`].
    pub fn is_valid(&self) -> bool {
        let parts = [self.vocabulary, self.syntax, self.readability];
        parts.iter().all(|w| *w >= 0.0)
            && (parts.iter().sum::<f64>() - 1.0).abs() <= WEIGHT_TOLERANCE
    }

    /// Weighted sum of the three sub-scores.
    pub fn combine(&self, vocabulary: f64, syntax: f64, readability: f64) -> f64 {
        self.vocabulary * vocabulary + self.syntax * syntax + self.readability * readability
    }
}

/// Immutable scoring parameters for one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreConfig {
    /// Sub-score weights.
    pub weights: Weights,
    /// Analyze long texts whole instead of sampling.
    pub full_analysis: bool,
    /// Word count above which texts are sampled.
    pub sampling_threshold: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            full_analysis: false,
            sampling_threshold: DEFAULT_SAMPLING_THRESHOLD,
        }
    }
}

/// One configuration change, applied by [`ScoreConfig::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreOption {
    /// Set vocabulary, syntax, and readability weights.
    Weights(f64, f64, f64),
    /// Force whole-text analysis.
    FullAnalysis,
    /// Set the sampling word-count threshold.
    SamplingThreshold(usize),
}

impl ScoreConfig {
    /// Starts from the defaults and applies `options` in order.
    pub fn from_options(options: impl IntoIterator<Item = ScoreOption>) -> Self {
        options
            .into_iter()
            .fold(Self::default(), |config, option| config.apply(option))
    }

    /// Applies one option, ignoring it if invalid.
    #[must_use]
    pub fn apply(self, option: ScoreOption) -> Self {
        match option {
            ScoreOption::Weights(v, s, r) => self.with_weights(v, s, r),
            ScoreOption::FullAnalysis => self.with_full_analysis(),
            ScoreOption::SamplingThreshold(n) => self.with_sampling_threshold(n),
        }
    }

    /// Sets the weights if they are non-negative and sum to 1.0.
    #[must_use]
    pub fn with_weights(self, vocabulary: f64, syntax: f64, readability: f64) -> Self {
        let weights = Weights {
            vocabulary,
            syntax,
            readability,
        };
        if !weights.is_valid() {
            tracing::debug!(?weights, "ignoring invalid weights");
            return self;
        }
        Self { weights, ..self }
    }

    /// Forces whole-text analysis.
    #[must_use]
    pub const fn with_full_analysis(self) -> Self {
        Self {
            full_analysis: true,
            ..self
        }
    }

    /// Sets the sampling threshold if it is positive.
    #[must_use]
    pub fn with_sampling_threshold(self, threshold: usize) -> Self {
        if threshold == 0 {
            tracing::debug!("ignoring zero sampling threshold");
            return self;
        }
        Self {
            sampling_threshold: threshold,
            ..self
        }
    }
}
