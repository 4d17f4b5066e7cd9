//! revisit-core: adaptive review session engine.
//!
//! This crate parses multiple-choice question banks, serves questions in
//! random no-repeat order, scores answers, and re-serves wrong answers in
//! review passes until they are cleared or a fatigue limit is reached.

pub mod bank;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod export;
pub mod model;
pub mod parser;
pub mod selector;
pub mod session;
pub mod shared;
pub mod statistics;

pub use bank::QuestionBank;
pub use config::{Preset, SessionConfig};
pub use error::{BankError, ConfigError, ExportError, InvalidState, ParseError, SessionError};
pub use export::{DirectoryExporter, ExportArtifact, ExportStatus, Exporter};
pub use model::{AttemptResult, Label, Question, QuestionRecord, SessionMode};
pub use session::{AdvanceOutcome, Session};
pub use shared::SharedSession;
pub use statistics::{Percent, Stats};
