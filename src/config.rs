use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Which side of the attempt supplies the word count for words-per-minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WpmBasis {
    #[default]
    Reference,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub case_sensitive: bool,
    /// Strip leading/trailing punctuation from each token before comparison.
    /// The diff still reports the original tokens.
    #[serde(default = "default_ignore_punctuation")]
    pub ignore_punctuation: bool,
    #[serde(default)]
    pub wpm_basis: WpmBasis,
}

fn default_ignore_punctuation() -> bool {
    true
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            ignore_punctuation: default_ignore_punctuation(),
            wpm_basis: WpmBasis::Reference,
        }
    }
}

impl ScoringConfig {
    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::io("read scoring config", e))?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ScoringError> {
        serde_json::from_str(data).map_err(|e| ScoringError::json("parse scoring config", e))
    }
}
