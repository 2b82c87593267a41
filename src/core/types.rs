use serde::{Deserialize, Serialize};

/// Where a candidate name was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// Basename of the file a record was read from
    Filename,
    /// The record's own exercise field
    ExerciseField,
}

impl std::fmt::Display for MatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Filename => write!(f, "filename"),
            Self::ExerciseField => write!(f, "exercise_field"),
        }
    }
}

/// Discrete score tiers produced by the match scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    NoMatch,
    /// One string contains the other
    Substring,
    /// At least one word in common
    SharedWord,
    /// All words of the shorter string appear in the longer one
    WordSubset,
    /// One string ends with the other
    Suffix,
    /// One string starts with the other
    Prefix,
    /// Equal after trimming and lower-casing
    Exact,
}

impl MatchTier {
    #[must_use]
    pub fn score(self) -> u8 {
        match self {
            Self::Exact => 100,
            Self::Prefix => 90,
            Self::Suffix => 80,
            Self::WordSubset => 70,
            Self::SharedWord => 60,
            Self::Substring => 50,
            Self::NoMatch => 0,
        }
    }

    /// Map a score back to its tier. Scores between tiers round down.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            100..=u8::MAX => Self::Exact,
            90..=99 => Self::Prefix,
            80..=89 => Self::Suffix,
            70..=79 => Self::WordSubset,
            60..=69 => Self::SharedWord,
            50..=59 => Self::Substring,
            _ => Self::NoMatch,
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Prefix => write!(f, "prefix"),
            Self::Suffix => write!(f, "suffix"),
            Self::WordSubset => write!(f, "word subset"),
            Self::SharedWord => write!(f, "shared word"),
            Self::Substring => write!(f, "substring"),
            Self::NoMatch => write!(f, "no match"),
        }
    }
}
