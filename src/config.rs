// File: src/config.rs
//! Solver configuration, loadable from a JSON file.
//!
//! ```
//! use boggle_core::config::{RankDisplay, SolverConfig};
//!
//! let config = SolverConfig::from_json_str(r#"{ "min_word_len": 4 }"#).unwrap();
//! assert_eq!(config.min_word_len, 4);
//! assert_eq!(config.rank_display, RankDisplay::AllPaths);
//! ```

use crate::error::{BoggleError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MIN_WORD_LEN: usize = 3;

/// How found words are presented to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankDisplay {
    /// Every distinct path per word.
    #[default]
    AllPaths,
    /// Occurrence count plus one representative path.
    CountWithRepresentative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Shortest word that is reported.
    pub min_word_len: usize,
    /// Optional cap on search depth.
    pub max_word_len: Option<usize>,
    pub rank_display: RankDisplay,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_word_len: DEFAULT_MIN_WORD_LEN,
            max_word_len: None,
            rank_display: RankDisplay::default(),
        }
    }
}

impl SolverConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_word_len == 0 {
            return Err(BoggleError::Config("min_word_len must be at least 1".into()));
        }
        if let Some(max) = self.max_word_len {
            if max < self.min_word_len {
                return Err(BoggleError::Config(format!(
                    "max_word_len ({}) is below min_word_len ({})",
                    max, self.min_word_len
                )));
            }
        }
        Ok(())
    }

    pub fn with_min_word_len(mut self, len: usize) -> Self {
        self.min_word_len = len;
        self
    }

    pub fn with_max_word_len(mut self, len: usize) -> Self {
        self.max_word_len = Some(len);
        self
    }

    pub fn with_rank_display(mut self, mode: RankDisplay) -> Self {
        self.rank_display = mode;
        self
    }
}
