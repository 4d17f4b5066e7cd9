//! The `revisit validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let bank = revisit_core::parser::load_bank_file(&bank_path)?;

    let multi = bank.questions().iter().filter(|q| q.is_multi_select()).count();
    println!(
        "Question bank: {} ({} questions, {} multi-select)",
        bank_path.display(),
        bank.len(),
        multi
    );

    let warnings = revisit_core::parser::validate_bank(&bank);
    for w in &warnings {
        println!("  [record {}] WARNING: {}", w.index, w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
