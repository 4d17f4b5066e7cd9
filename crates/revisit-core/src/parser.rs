//! Question record parser.
//!
//! Turns the flat line records of a bank file into structured questions,
//! and loads whole banks from JSON. Any malformed record rejects the bank.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use anyhow::{Context, Result};

use crate::bank::QuestionBank;
use crate::error::{BankError, ParseError};
use crate::model::{Label, Question, QuestionOption, QuestionRecord};

const ANSWER_MARKER: &str = "Answer";
const ANSWER_PREFIX: &str = "Answer:";
const EXPLANATION_TOKEN: &str = "Explanation";
const EXPLANATION_BREAK: &str = "\n\nExplanation:\n\n";

/// Returns the label if `line` starts with an option marker like `C.`.
fn option_marker(line: &str) -> Option<Label> {
    let mut chars = line.chars();
    let label = chars.next().and_then(Label::new)?;
    (chars.next() == Some('.')).then_some(label)
}

fn is_answer_line(line: &str) -> bool {
    line.starts_with(ANSWER_MARKER)
}

fn join_trimmed<'a>(lines: impl IntoIterator<Item = &'a String>) -> String {
    lines
        .into_iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the labels of an `Answer:` line into the correctness key.
///
/// The prefix and every `.` are stripped; each comma-separated token is
/// reduced to its leading character.
pub fn parse_answer_labels(line: &str) -> Result<BTreeSet<Label>, ParseError> {
    let body = line
        .strip_prefix(ANSWER_PREFIX)
        .or_else(|| line.strip_prefix(ANSWER_MARKER))
        .unwrap_or(line)
        .replace('.', "");

    let mut labels = BTreeSet::new();
    for token in body.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let label = token
            .chars()
            .next()
            .and_then(Label::new)
            .ok_or_else(|| ParseError::InvalidLabel {
                token: token.to_string(),
            })?;
        labels.insert(label);
    }

    if labels.is_empty() {
        return Err(ParseError::EmptyAnswer);
    }
    Ok(labels)
}

/// Parse one record into a [`Question`].
pub fn parse_question(record: &QuestionRecord) -> Result<Question, ParseError> {
    let lines = record.lines();

    let answer_pos = lines
        .iter()
        .position(|l| is_answer_line(l))
        .ok_or(ParseError::MissingAnswer)?;
    let first_option = lines
        .iter()
        .position(|l| option_marker(l).is_some())
        .ok_or(ParseError::NoOptions)?;
    if first_option > answer_pos {
        return Err(ParseError::AnswerBeforeOptions { line: answer_pos });
    }

    let stem = join_trimmed(&lines[..first_option]);

    let mut options: Vec<QuestionOption> = Vec::new();
    for line in &lines[first_option..answer_pos] {
        if let Some(label) = option_marker(line) {
            if options.iter().any(|o| o.label == label) {
                return Err(ParseError::DuplicateOption {
                    label: label.as_char(),
                });
            }
            options.push(QuestionOption {
                label,
                text: line[2..].trim().to_string(),
            });
            continue;
        }

        let continuation = line.trim();
        if continuation.is_empty() {
            continue;
        }
        // first_option guarantees at least one option exists here
        if let Some(current) = options.last_mut() {
            if !current.text.is_empty() {
                current.text.push(' ');
            }
            current.text.push_str(continuation);
        }
    }

    let correct_labels = parse_answer_labels(&lines[answer_pos])?;
    let known: HashSet<Label> = options.iter().map(|o| o.label).collect();
    if let Some(unknown) = correct_labels.iter().find(|l| !known.contains(l)) {
        return Err(ParseError::UnknownLabel {
            label: unknown.as_char(),
        });
    }

    let explanation = lines[answer_pos..]
        .join(" ")
        .replacen(EXPLANATION_TOKEN, EXPLANATION_BREAK, 1);

    Ok(Question {
        stem,
        options,
        correct_labels,
        explanation,
    })
}

/// Parse a JSON bank (an array of string arrays) into a [`QuestionBank`].
pub fn parse_bank_str(content: &str) -> Result<QuestionBank, BankError> {
    let records: Vec<QuestionRecord> = serde_json::from_str(content)?;
    QuestionBank::from_records(records)
}

/// Read and parse a bank file from disk.
pub fn load_bank_file(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content)
        .with_context(|| format!("failed to load question bank: {}", path.display()))
}

/// A non-fatal issue found in a loaded bank.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Record index the warning refers to.
    pub index: usize,
    /// Warning message.
    pub message: String,
}

/// Check a bank for issues that do not prevent parsing.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_stems = HashSet::new();
    for (index, question) in bank.questions().iter().enumerate() {
        if question.stem.is_empty() {
            warnings.push(ValidationWarning {
                index,
                message: "question has no stem text".into(),
            });
        } else if !seen_stems.insert(question.stem.as_str()) {
            warnings.push(ValidationWarning {
                index,
                message: format!("duplicate stem: {}", question.stem),
            });
        }

        if question.options.len() < 2 {
            warnings.push(ValidationWarning {
                index,
                message: "question has a single option".into(),
            });
        }

        for option in question.options.iter().filter(|o| o.text.is_empty()) {
            warnings.push(ValidationWarning {
                index,
                message: format!("option {} has no text", option.label),
            });
        }

        if !question.explanation.contains(EXPLANATION_BREAK) {
            warnings.push(ValidationWarning {
                index,
                message: "no `Explanation` section".into(),
            });
        }
    }

    warnings
}
