//! Core library for cefr-lens.
//!
//! Estimates the CEFR level (A1 through C2) of English text from three
//! families of features: vocabulary difficulty, syntactic complexity, and
//! classic readability formulas. Everything runs offline against word lists
//! embedded in the binary.
//!
//! # Modules
//!
//! - [`assess`] - The assessment pipeline and confidence estimate
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`lexicon`] - Embedded word lists behind the [`LexicalStore`] trait
//! - [`text`] - Normalization, sentence splitting, and tokenization
//! - [`lemma`] - Rule-based lemmatizer
//! - [`vocabulary`], [`syntax`], [`readability`] - The three feature scorers
//! - [`sampling`] - Segment extraction and merging for long texts
//!
//! # Quick Start
//!
//! ```
//! use cefr_lens_core::{ScoreConfig, assess};
//!
//! let report = assess("The cat sat on the mat. It was a good day.", &ScoreConfig::default())?;
//! println!("{} ({:.2})", report.level, report.score);
//! # Ok::<(), cefr_lens_core::AssessError>(())
//! ```
#![deny(unsafe_code)]

pub mod anchors;
pub mod assess;
pub mod config;
pub mod error;
pub mod lemma;
pub mod level;
pub mod lexicon;
pub mod readability;
pub mod report;
pub mod sampling;
pub mod score_config;
pub mod syllables;
pub mod syntax;
pub mod text;
pub mod vocabulary;
pub mod word_lists;

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

pub use assess::{assess, assess_with, confidence};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{
    AssessError, AssessResult, ConfigError, ConfigResult, LexiconError, LexiconResult,
};
pub use lemma::lemmatize;
pub use level::CefrLevel;
pub use lexicon::{LexicalStore, Lexicon, WordList};
pub use report::{AssessmentReport, ReadabilityReport, SyntaxReport, VocabularyReport};
pub use score_config::{ScoreConfig, ScoreOption, Weights};
