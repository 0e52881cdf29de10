//! CEFR levels and the mapping between levels and continuous scores.
//!
//! Scores live on a 1.0–6.0 scale where each integer step is one CEFR band.
//! Band boundaries sit on the half steps:
//!
//! | Level | Score range |
//! |-------|-------------|
//! | A1    | [1.0, 1.5)  |
//! | A2    | [1.5, 2.5)  |
//! | B1    | [2.5, 3.5)  |
//! | B2    | [3.5, 4.5)  |
//! | C1    | [4.5, 5.5)  |
//! | C2    | [5.5, 6.0]  |

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lowest possible score.
pub const MIN_SCORE: f64 = 1.0;

/// Highest possible score.
pub const MAX_SCORE: f64 = 6.0;

/// A CEFR proficiency band, ordered from easiest to hardest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CefrLevel {
    /// Breakthrough.
    #[cfg_attr(feature = "clap", value(name = "A1", alias = "a1"))]
    #[serde(alias = "a1")]
    A1,
    /// Waystage.
    #[cfg_attr(feature = "clap", value(name = "A2", alias = "a2"))]
    #[serde(alias = "a2")]
    A2,
    /// Threshold.
    #[cfg_attr(feature = "clap", value(name = "B1", alias = "b1"))]
    #[serde(alias = "b1")]
    B1,
    /// Vantage.
    #[cfg_attr(feature = "clap", value(name = "B2", alias = "b2"))]
    #[serde(alias = "b2")]
    B2,
    /// Effective operational proficiency.
    #[cfg_attr(feature = "clap", value(name = "C1", alias = "c1"))]
    #[serde(alias = "c1")]
    C1,
    /// Mastery.
    #[cfg_attr(feature = "clap", value(name = "C2", alias = "c2"))]
    #[serde(alias = "c2")]
    C2,
}

impl CefrLevel {
    /// All levels in ascending order.
    pub const ALL: [Self; 6] = [Self::A1, Self::A2, Self::B1, Self::B2, Self::C1, Self::C2];

    /// Returns the level label ("A1" through "C2").
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }

    /// Returns the numeric rank of the level, 1 for A1 through 6 for C2.
    pub const fn rank(self) -> u8 {
        match self {
            Self::A1 => 1,
            Self::A2 => 2,
            Self::B1 => 3,
            Self::B2 => 4,
            Self::C1 => 5,
            Self::C2 => 6,
        }
    }

    /// Builds a level from its numeric rank (1–6).
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Self::A1),
            2 => Some(Self::A2),
            3 => Some(Self::B1),
            4 => Some(Self::B2),
            5 => Some(Self::C1),
            6 => Some(Self::C2),
            _ => None,
        }
    }

    /// Maps a continuous score to a level.
    ///
    /// The score is clamped to [`MIN_SCORE`, `MAX_SCORE`] first, so every
    /// input (including NaN, which clamps to A1) yields a level.
    pub fn from_score(score: f64) -> Self {
        let score = clamp_score(score);
        if score < 1.5 {
            Self::A1
        } else if score < 2.5 {
            Self::A2
        } else if score < 3.5 {
            Self::B1
        } else if score < 4.5 {
            Self::B2
        } else if score < 5.5 {
            Self::C1
        } else {
            Self::C2
        }
    }

    /// Returns the base score of the level (1.0 for A1 through 6.0 for C2).
    pub fn base_score(self) -> f64 {
        f64::from(self.rank())
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown CEFR level: {0} (expected A1, A2, B1, B2, C1, or C2)")]
pub struct ParseLevelError(String);

impl FromStr for CefrLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(Self::A1),
            "A2" => Ok(Self::A2),
            "B1" => Ok(Self::B1),
            "B2" => Ok(Self::B2),
            "C1" => Ok(Self::C1),
            "C2" => Ok(Self::C2),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Clamps a score to the valid 1.0–6.0 range. NaN clamps to the minimum.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}
