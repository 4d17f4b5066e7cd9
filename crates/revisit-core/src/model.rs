//! Core data model types for revisit.
//!
//! These are the values that flow between the parser, the session state
//! machine, and the reporter: raw question records, parsed questions, and
//! the per-attempt results the session produces.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An option label, one of `A` to `F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Label(char);

impl Label {
    /// Accepts exactly the characters `A` to `F`.
    pub fn new(c: char) -> Option<Self> {
        matches!(c, 'A'..='F').then_some(Self(c))
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Label {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Label::new(c).ok_or_else(|| format!("invalid option label: {c:?}"))
    }
}

impl From<Label> for char {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The raw ingestion unit: the text lines of one question, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionRecord {
    lines: Vec<String>,
}

impl QuestionRecord {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<String>> for QuestionRecord {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

impl<S: Into<String>> FromIterator<S> for QuestionRecord {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: Label,
    /// Option text without the `A.` marker.
    pub text: String,
}

impl fmt::Display for QuestionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}.", self.label)
        } else {
            write!(f, "{}. {}", self.label, self.text)
        }
    }
}

/// A parsed multiple-choice question. Immutable once built by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question text, all stem lines joined with single spaces.
    pub stem: String,
    /// Options in record order. Never empty.
    pub options: Vec<QuestionOption>,
    /// Labels that make up the single correct answer. Always a subset of
    /// the option labels.
    pub correct_labels: BTreeSet<Label>,
    /// Answer line plus explanation body, for display only.
    pub explanation: String,
}

impl Question {
    pub fn option(&self, label: Label) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.label == label)
    }

    /// True when more than one option must be selected.
    pub fn is_multi_select(&self) -> bool {
        self.correct_labels.len() > 1
    }

    /// Explanation ready for display, answer line first and the body as a
    /// separate paragraph.
    pub fn explanation_text(&self) -> &str {
        self.explanation.trim()
    }

    /// Re-serialize the stem, options and answer key as record lines.
    ///
    /// The explanation body is not reproduced.
    pub fn to_record(&self) -> QuestionRecord {
        let mut lines = Vec::with_capacity(self.options.len() + 2);
        if !self.stem.is_empty() {
            lines.push(self.stem.clone());
        }
        lines.extend(self.options.iter().map(ToString::to_string));
        let labels: Vec<String> = self.correct_labels.iter().map(ToString::to_string).collect();
        lines.push(format!("Answer: {}.", labels.join(", ")));
        QuestionRecord::new(lines)
    }
}

/// The result of scoring one submission. Handed back to the caller and not
/// retained by the session except through [`WrongAnswerRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptResult {
    pub question: Question,
    /// First characters of the submitted selections.
    pub selected: BTreeSet<char>,
    pub correct: bool,
    /// Whether the attempt was made during a review pass.
    pub in_review: bool,
}

/// A wrong answer kept for review and for the export artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongAnswerRecord {
    /// Position of the question in the loaded bank.
    pub bank_index: usize,
    pub question: Question,
    pub selected: BTreeSet<char>,
}

/// Coarse session mode, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Normal,
    Reviewing,
    Paused,
    Finished,
}

impl SessionMode {
    /// Paused and Finished sessions serve no further questions.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionMode::Paused | SessionMode::Finished)
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Normal => write!(f, "normal"),
            SessionMode::Reviewing => write!(f, "reviewing"),
            SessionMode::Paused => write!(f, "paused"),
            SessionMode::Finished => write!(f, "finished"),
        }
    }
}
