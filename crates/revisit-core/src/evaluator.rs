//! Answer-correctness evaluation.

use std::collections::BTreeSet;

use crate::model::Question;

/// Reduce submitted selections to their leading characters.
///
/// Selections may be bare labels (`"B"`) or full option strings
/// (`"B. Isaac Asimov."`). Empty strings contribute nothing.
pub fn selected_labels<S: AsRef<str>>(selected: &[S]) -> BTreeSet<char> {
    selected
        .iter()
        .filter_map(|s| s.as_ref().chars().next())
        .collect()
}

/// All-or-nothing check: the selected labels must equal the answer key.
pub fn is_correct(question: &Question, selected: &BTreeSet<char>) -> bool {
    selected.len() == question.correct_labels.len()
        && question
            .correct_labels
            .iter()
            .all(|label| selected.contains(&label.as_char()))
}

/// Evaluate a submission against a question.
pub fn evaluate<S: AsRef<str>>(question: &Question, selected: &[S]) -> bool {
    is_correct(question, &selected_labels(selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionRecord;
    use crate::parser::parse_question;

    fn question(answer: &str) -> Question {
        let record: QuestionRecord = ["Pick", "A. a", "B. b", "C. c", "D. d", answer]
            .into_iter()
            .collect();
        parse_question(&record).unwrap()
    }

    #[test]
    fn exact_answer_is_correct() {
        let q = question("Answer: B, C.");
        assert!(evaluate(&q, &["B", "C"]));
        assert!(evaluate(&q, &["C. c", "B. b"]));
    }

    #[test]
    fn extra_or_missing_option_is_wrong() {
        let q = question("Answer: B, C.");
        assert!(!evaluate(&q, &["B", "C", "D"]));
        assert!(!evaluate(&q, &["B"]));
        assert!(!evaluate(&q, &["A", "D"]));
    }

    #[test]
    fn empty_selection_is_wrong_not_an_error() {
        let q = question("Answer: A.");
        let none: [&str; 0] = [];
        assert!(!evaluate(&q, &none));
        assert!(!evaluate(&q, &[""]));
    }

    #[test]
    fn duplicate_selections_collapse() {
        let q = question("Answer: A.");
        assert!(evaluate(&q, &["A", "A. a"]));
    }

    #[test]
    fn lowercase_labels_do_not_match() {
        let q = question("Answer: A.");
        assert!(!evaluate(&q, &["a"]));
    }

    #[test]
    fn key_itself_is_always_correct() {
        let q = question("Answer: A, B, D.");
        let key: Vec<String> = q.correct_labels.iter().map(ToString::to_string).collect();
        assert!(evaluate(&q, &key));

        let mut with_extra = key.clone();
        with_extra.push("C".into());
        assert!(!evaluate(&q, &with_extra));

        assert!(!evaluate(&q, &key[1..]));
    }
}
