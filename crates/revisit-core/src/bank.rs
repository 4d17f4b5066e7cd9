//! The question bank: every parsed question of a session, in load order.

use crate::error::BankError;
use crate::model::{Question, QuestionRecord};
use crate::parser::parse_question;

/// An immutable, non-empty collection of parsed questions.
///
/// The raw records are kept next to the parsed questions so the export
/// artifact can reproduce them exactly as they were loaded.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// Parse every record. The first malformed record rejects the bank.
    pub fn from_records(records: Vec<QuestionRecord>) -> Result<Self, BankError> {
        if records.is_empty() {
            return Err(BankError::Empty);
        }

        let questions = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                parse_question(record).map_err(|reason| BankError::Malformed { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(questions = questions.len(), "parsed question bank");
        Ok(Self { questions, records })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed bank.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// The raw record a question was parsed from.
    pub fn record(&self, index: usize) -> Option<&QuestionRecord> {
        self.records.get(index)
    }
}
