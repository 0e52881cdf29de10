//! Error types for cefr-lens-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while building the embedded lexical store.
///
/// The store is built once per process and the outcome is cached, so this
/// type is `Clone`: every caller that checks initialization status gets its
/// own copy of the same failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    /// An embedded word list could not be parsed.
    #[error("failed to parse embedded word list {file}: {message}")]
    Parse {
        /// Name of the embedded data file.
        file: &'static str,
        /// Parser error message.
        message: String,
    },

    /// An embedded word list produced no usable entries.
    #[error("embedded word list {file} has no entries")]
    Empty {
        /// Name of the embedded data file.
        file: &'static str,
    },
}

/// Result type alias using [`LexiconError`].
pub type LexiconResult<T> = Result<T, LexiconError>;

/// Errors that can occur while assessing a text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessError {
    /// The input is blank after trimming.
    #[error("empty text")]
    EmptyInput,

    /// The input contains no ASCII letters.
    #[error("no English content")]
    NoEnglishContent,

    /// The lexical store failed to initialize.
    #[error(transparent)]
    LexicalStoreUnavailable(#[from] LexiconError),

    /// Every token is punctuation, a number, a stopword, or a proper noun.
    #[error("no content words found in text")]
    NoContentWords,

    /// Every sampled segment failed analysis.
    #[error("all sampled segments failed analysis")]
    AllSegmentsFailed,
}

/// Result type alias using [`AssessError`].
pub type AssessResult<T> = Result<T, AssessError>;
