//! End-to-end session tests through the public API.
//!
//! These drive whole sessions over the sample bank in `banks/` and check
//! that what gets exported can be loaded back as a focused bank.

use std::path::Path;

use revisit_core::parser::{load_bank_file, parse_bank_str};
use revisit_core::{
    AdvanceOutcome, DirectoryExporter, ExportStatus, Preset, Question, Session, SessionConfig,
    SessionMode,
};

fn sample_bank() -> revisit_core::QuestionBank {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../banks/general.json");
    load_bank_file(&path).unwrap()
}

fn key(question: &Question) -> Vec<String> {
    question
        .correct_labels
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn single_pass(preset: Preset) -> SessionConfig {
    SessionConfig {
        cyclic: false,
        ..preset.config()
    }
}

#[test]
fn perfect_run_finishes_without_review() {
    let bank = sample_bank();
    let total = bank.len();
    let mut session = Session::with_seed(single_pass(Preset::Classic), 11).unwrap();
    session.install(bank);

    for _ in 0..total {
        let outcome = session.advance().unwrap();
        let question = outcome.question().unwrap().clone();
        assert!(session.submit_answer(&key(&question)).unwrap().correct);
    }

    let stats = session.stats();
    assert_eq!(stats.accuracy.to_string(), "100.00");
    assert_eq!(stats.progress.to_string(), "100.00");
    assert_eq!(stats.final_score.to_string(), "100.00");
    assert_eq!(session.advance().unwrap(), AdvanceOutcome::Finished);
}

#[test]
fn missed_questions_round_trip_through_export() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig {
        wrong_answer_trigger: 100,
        ..single_pass(Preset::Classic)
    };
    let mut session = Session::with_seed(config, 3)
        .unwrap()
        .with_exporter(Box::new(DirectoryExporter::new(dir.path())));
    session.install(sample_bank());

    let mut missed = Vec::new();
    let mut round = 0;
    while let AdvanceOutcome::Served(question) = session.advance().unwrap() {
        if round % 2 == 0 {
            let none: [&str; 0] = [];
            session.submit_answer(&none).unwrap();
            missed.push(question.stem.clone());
        } else {
            session.submit_answer(&key(&question)).unwrap();
        }
        round += 1;
    }

    assert_eq!(session.mode(), SessionMode::Finished);
    let ExportStatus::Written(path) = session.last_export().clone() else {
        panic!("expected an export, got {:?}", session.last_export());
    };

    let focused = parse_bank_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    let stems: Vec<&str> = focused.questions().iter().map(|q| q.stem.as_str()).collect();
    assert_eq!(stems, missed);
}

#[test]
fn repeated_failure_pauses_strict_session() {
    let config = SessionConfig {
        repeated_review_limit: Some(0),
        ..Preset::Strict.config()
    };
    let mut session = Session::with_seed(config, 5).unwrap();
    session.install(sample_bank());

    let mut outcome = session.advance().unwrap();
    let mut steps = 0;
    while !matches!(outcome, AdvanceOutcome::Paused | AdvanceOutcome::Finished) {
        session.submit_answer(&["F"]).unwrap();
        outcome = session.advance().unwrap();
        steps += 1;
        assert!(steps < 20, "session never paused");
    }

    assert_eq!(outcome, AdvanceOutcome::Paused);
    // three misses enter review, three more fail the single pass
    assert_eq!(steps, 6);
    assert_eq!(session.stats().repeated_review_entries, 1);
}
