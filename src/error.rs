// File: src/error.rs
use thiserror::Error;

/// Errors surfaced to the host. Malformed dictionary entries never show up
/// here: `Lexicon::build` skips them.
#[derive(Debug, Error)]
pub enum BoggleError {
    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },

    #[error("lexicon has no usable words")]
    EmptyLexicon,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl BoggleError {
    pub(crate) fn invalid_board(reason: impl Into<String>) -> Self {
        Self::InvalidBoard { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, BoggleError>;
