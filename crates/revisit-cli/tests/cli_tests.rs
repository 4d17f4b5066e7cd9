//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn revisit(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("revisit").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env_remove("REVISIT_EXPORT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

/// A bank where option A is always the right answer.
fn write_bank(dir: &Path, n: usize) -> std::path::PathBuf {
    let records: Vec<Vec<String>> = (0..n)
        .map(|i| {
            vec![
                format!("Question {i}?"),
                "A. right".to_string(),
                "B. wrong".to_string(),
                "Answer: A.".to_string(),
                "Explanation".to_string(),
                format!("A is right for question {i}."),
            ]
        })
        .collect();
    let path = dir.join("bank.json");
    std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
    path
}

fn exported_files(dir: &Path) -> Vec<std::path::PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("wA") && n.ends_with(".json"))
            })
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn validate_sample_bank() {
    let dir = TempDir::new().unwrap();
    let bank = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../banks/general.json");

    revisit(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("6 questions, 3 multi-select"))
        .stdout(predicate::str::contains("[record 5] WARNING: no `Explanation` section"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_reports_failing_record() {
    let dir = TempDir::new().unwrap();
    let bank = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../banks/broken.json");

    revisit(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed question at record 1"))
        .stderr(predicate::str::contains("missing `Answer:` line"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();

    revisit(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn quiz_all_correct_single_pass() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(dir.path(), 3);

    revisit(dir.path())
        .args(["quiz", "--preset", "strict", "--seed", "7", "--no-export", "--bank"])
        .arg(&bank)
        .write_stdin("A\na\nA\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct."))
        .stdout(predicate::str::contains("Incorrect.").not())
        .stdout(predicate::str::contains("Every question has been answered."))
        .stdout(predicate::str::contains("100.00%"));

    assert!(exported_files(dir.path()).is_empty());
}

#[test]
fn quiz_reviews_and_exports_wrong_answers() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(dir.path(), 3);
    let out = dir.path().join("exports");

    // three misses trigger review under strict; three more fail the pass
    revisit(dir.path())
        .args(["quiz", "--preset", "strict", "--seed", "1", "--bank"])
        .arg(&bank)
        .arg("--export-dir")
        .arg(&out)
        .write_stdin("B\nB\nB\nB\nB\nB\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Review: 3 question(s) to revisit =="))
        .stdout(predicate::str::contains("Every question has been answered."))
        .stdout(predicate::str::contains("Wrong answers saved to"));

    let files = exported_files(&out);
    assert_eq!(files.len(), 1);
    let content = std::fs::read_to_string(&files[0]).unwrap();
    let records: Vec<Vec<String>> = serde_json::from_str(&content).unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.contains(&"Answer: A.".to_string())));
}

#[test]
fn quiz_quit_exports_what_was_missed() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(dir.path(), 5);

    revisit(dir.path())
        .args(["quiz", "--preset", "drill", "--bank"])
        .arg(&bank)
        .write_stdin("B\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect."))
        .stdout(predicate::str::contains("Wrong answers saved to"));

    assert_eq!(exported_files(dir.path()).len(), 1);
}

#[test]
fn quiz_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(dir.path(), 2);
    std::fs::write(
        dir.path().join("revisit.toml"),
        "preset = \"classic\"\n[session]\ncyclic = false\n[export]\nenabled = false\n",
    )
    .unwrap();

    revisit(dir.path())
        .args(["quiz", "--bank"])
        .arg(&bank)
        .write_stdin("B\nA\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Every question has been answered."))
        .stdout(predicate::str::contains("50.00%"));

    assert!(exported_files(dir.path()).is_empty());
}

#[test]
fn quiz_rejects_unknown_preset() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(dir.path(), 2);

    revisit(dir.path())
        .args(["quiz", "--preset", "lenient", "--bank"])
        .arg(&bank)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown preset"));
}

#[test]
fn quiz_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(dir.path(), 2);

    revisit(dir.path())
        .args(["quiz", "--config", "missing.toml", "--bank"])
        .arg(&bank)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn presets_lists_every_preset() {
    let dir = TempDir::new().unwrap();

    revisit(dir.path())
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("classic"))
        .stdout(predicate::str::contains("strict"))
        .stdout(predicate::str::contains("single pass"))
        .stdout(predicate::str::contains("drill"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    revisit(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created revisit.toml"))
        .stdout(predicate::str::contains("Created bank.json"));

    assert!(dir.path().join("revisit.toml").exists());

    revisit(dir.path())
        .args(["validate", "--bank", "bank.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Question bank valid."));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    revisit(dir.path()).arg("init").assert().success();

    revisit(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();

    revisit(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Adaptive multiple-choice review sessions"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();

    revisit(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("revisit"));
}
