//! Error types for the review engine.
//!
//! Every error here is recoverable: the engine stays in a well-defined state
//! after any failed call, and callers classify failures by matching on the
//! variant rather than on message text.

use thiserror::Error;

/// Why a single question record could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No line starting with `Answer` exists in the record.
    #[error("missing `Answer:` line")]
    MissingAnswer,

    /// The record has no `A.`–`F.` option lines at all.
    #[error("no option lines (`A.` to `F.`) found")]
    NoOptions,

    /// The `Answer` line appears before the first option line.
    #[error("`Answer:` line at line {line} precedes every option")]
    AnswerBeforeOptions { line: usize },

    /// The `Answer` line lists no labels.
    #[error("`Answer:` line lists no labels")]
    EmptyAnswer,

    /// An answer token does not start with a label character `A`–`F`.
    #[error("invalid answer label {token:?}")]
    InvalidLabel { token: String },

    /// The answer names a label that no option carries.
    #[error("answer label {label} does not match any option")]
    UnknownLabel { label: char },

    /// Two option lines share the same label.
    #[error("duplicate option label {label}")]
    DuplicateOption { label: char },
}

/// Errors raised while loading a question bank.
#[derive(Debug, Error)]
pub enum BankError {
    /// One record is malformed; the whole bank is rejected.
    #[error("malformed question at record {index}: {reason}")]
    Malformed { index: usize, reason: ParseError },

    /// The bank contains no records.
    #[error("question bank is empty")]
    Empty,

    /// The bank payload is not a JSON array of string arrays.
    #[error("invalid bank JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl BankError {
    /// Index of the offending record, if the failure is record-specific.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            BankError::Malformed { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// The engine was asked to do something its current state does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("no question bank is loaded")]
    NoBank,

    #[error("no question is currently being served")]
    NoQuestion,

    #[error("the current question has already been answered")]
    AlreadyAnswered,
}

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid state: {0}")]
    InvalidState(#[from] InvalidState),
}

/// Errors from writing the wrong-answer artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write export to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid session policy values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("review threshold must be within 0..=100, got {0}")]
    ThresholdOutOfRange(f64),

    #[error("max review cycles must be at least 1")]
    ZeroReviewCycles,

    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}
