//! The `revisit quiz` command.
//!
//! Runs one session on the terminal. Each prompt accepts option labels
//! (`B`, `b,c`, `A D`), `s` to skip, `stats`, or `q` to end the session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use revisit_core::{
    AdvanceOutcome, DirectoryExporter, ExportStatus, Preset, Question, Session, Stats,
};

use crate::config::load_config_from;

pub fn execute(
    bank_path: PathBuf,
    preset: Option<Preset>,
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    export_dir: Option<PathBuf>,
    no_export: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let session_config = config.session_config(preset)?;
    let bank = revisit_core::parser::load_bank_file(&bank_path)?;

    let mut session = match seed {
        Some(seed) => Session::with_seed(session_config, seed)?,
        None => Session::new(session_config)?,
    };
    session.install(bank);

    let exporter = (config.export.enabled && !no_export)
        .then(|| DirectoryExporter::new(export_dir.unwrap_or(config.export.dir)));
    if let Some(exporter) = &exporter {
        session.attach_exporter(Box::new(exporter.clone()));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut session, exporter.as_ref(), stdin.lock(), stdout.lock())
}

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Answer(Vec<String>),
    Skip,
    Stats,
    Help,
    Quit,
    Blank,
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => Input::Blank,
            "q" | "quit" | "exit" => Input::Quit,
            "s" | "skip" => Input::Skip,
            "stats" => Input::Stats,
            "?" | "h" | "help" => Input::Help,
            _ => Input::Answer(parse_labels(line)),
        }
    }
}

/// `"b, c"`, `"B C"` and `"bc"` all select B and C.
fn parse_labels(line: &str) -> Vec<String> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .flat_map(|token| {
            if token.chars().all(|c| c.is_ascii_alphabetic()) {
                token
                    .chars()
                    .map(|c| c.to_ascii_uppercase().to_string())
                    .collect::<Vec<_>>()
            } else {
                vec![token.to_uppercase()]
            }
        })
        .collect()
}

pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    exporter: Option<&DirectoryExporter>,
    mut input: R,
    mut out: W,
) -> Result<()> {
    print_banner(&mut out, session, exporter)?;
    let mut outcome = session.advance()?;

    'session: loop {
        let question = match &outcome {
            AdvanceOutcome::Served(q) => q,
            AdvanceOutcome::ReviewEntered(q) => {
                let pool = session.stats().review.map_or(0, |r| r.pool_size);
                writeln!(out, "\n== Review: {pool} question(s) to revisit ==")?;
                q
            }
            AdvanceOutcome::CycleRepeated { cycle, question } => {
                writeln!(out, "\n== Review pass {} ==", cycle + 1)?;
                question
            }
            AdvanceOutcome::ReviewExited(q) => {
                writeln!(out, "\n== Review complete, back to the bank ==")?;
                q
            }
            AdvanceOutcome::Finished => {
                writeln!(out, "\nEvery question has been answered.")?;
                break;
            }
            AdvanceOutcome::Paused => {
                writeln!(out, "\nReview limit reached. Session paused.")?;
                break;
            }
            AdvanceOutcome::NoOp(mode) => {
                writeln!(out, "\nSession already {mode}.")?;
                break;
            }
        };
        print_question(&mut out, question, &session.stats())?;

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break 'session;
            }

            match Input::parse(&line) {
                Input::Quit => break 'session,
                Input::Skip => break,
                Input::Blank => {}
                Input::Help => writeln!(
                    out,
                    "Enter option labels (e.g. B or A,C), s to skip, stats, or q to quit."
                )?,
                Input::Stats => print_summary(&mut out, &session.stats())?,
                Input::Answer(labels) => {
                    let result = session.submit_answer(&labels)?;
                    writeln!(
                        out,
                        "{}",
                        if result.correct { "Correct." } else { "Incorrect." }
                    )?;
                    writeln!(out, "{}", result.question.explanation_text())?;
                    break;
                }
            }
        }

        outcome = session.advance()?;
    }

    print_summary(&mut out, &session.stats())?;
    report_export(&mut out, session, exporter)
}

fn print_banner<W: Write>(
    out: &mut W,
    session: &Session,
    exporter: Option<&DirectoryExporter>,
) -> io::Result<()> {
    let total = session.bank().map_or(0, |bank| bank.len());
    writeln!(
        out,
        "{total} question(s), {}.",
        session.config().exhaustion_policy()
    )?;
    if let Some(exporter) = exporter {
        writeln!(out, "Missed questions go to {}.", exporter.dir().display())?;
    }
    Ok(())
}

fn print_question<W: Write>(out: &mut W, question: &Question, stats: &Stats) -> io::Result<()> {
    writeln!(out)?;
    match &stats.review {
        Some(review) => writeln!(
            out,
            "[review {}/{} | pass {}/{}]",
            review.position, review.pool_size, review.cycle, review.max_cycles
        )?,
        None => writeln!(
            out,
            "[{} answered | {}% correct]",
            stats.reviewed, stats.accuracy
        )?,
    }
    writeln!(out, "{}", question.stem)?;
    for option in &question.options {
        writeln!(out, "  {option}")?;
    }
    if question.is_multi_select() {
        writeln!(out, "(select all that apply)")?;
    }
    Ok(())
}

fn print_summary<W: Write>(out: &mut W, stats: &Stats) -> io::Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Answered", "Correct", "Accuracy", "Progress", "Score", "Missed", "Reviews"]);
    table.add_row(vec![
        Cell::new(stats.reviewed),
        Cell::new(stats.correct),
        Cell::new(format!("{}%", stats.accuracy)),
        Cell::new(format!("{}%", stats.progress)),
        Cell::new(format!("{}%", stats.final_score)),
        Cell::new(stats.lifetime_wrong),
        Cell::new(stats.repeated_review_entries),
    ]);
    writeln!(out, "\n{table}")
}

fn report_export<W: Write>(
    out: &mut W,
    session: &Session,
    exporter: Option<&DirectoryExporter>,
) -> Result<()> {
    match session.last_export() {
        ExportStatus::Written(path) => {
            writeln!(out, "Wrong answers saved to {}", path.display())?;
        }
        ExportStatus::NothingToExport => writeln!(out, "No wrong answers to save.")?,
        ExportStatus::Failed(msg) => writeln!(out, "Could not save wrong answers: {msg}")?,
        // quitting early ends the session without the engine's export
        ExportStatus::NotAttempted => {
            let Some(exporter) = exporter else {
                return Ok(());
            };
            if session.wrong_answers().is_empty() {
                writeln!(out, "No wrong answers to save.")?;
                return Ok(());
            }
            match session.export_with(exporter) {
                Ok(path) => writeln!(out, "Wrong answers saved to {}", path.display())?,
                Err(e) => {
                    tracing::warn!("failed to export wrong answers: {e}");
                    writeln!(out, "Could not save wrong answers: {e}")?;
                }
            }
        }
    }
    Ok(())
}
