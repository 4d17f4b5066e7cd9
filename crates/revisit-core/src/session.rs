//! The adaptive review session state machine.
//!
//! A session serves questions from the bank in random no-repeat order,
//! scores submissions, and switches into review mode when accuracy drops
//! and enough wrong answers have piled up. Review replays the wrong answers
//! in insertion order, repeating the pass until it is cleared or the cycle
//! limit is hit, then returns to Normal mode where it left off.
//!
//! The engine only moves in response to calls: [`Session::load_bank`],
//! [`Session::submit_answer`], [`Session::advance`] and [`Session::reset`].

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::bank::QuestionBank;
use crate::config::SessionConfig;
use crate::error::{BankError, ConfigError, ExportError, InvalidState, SessionError};
use crate::evaluator::{is_correct, selected_labels};
use crate::export::{ExportArtifact, ExportStatus, Exporter};
use crate::model::{AttemptResult, Question, QuestionRecord, SessionMode, WrongAnswerRecord};
use crate::selector::{entropy_source, seeded_source, select_next, IndexSource, Selection};
use crate::statistics::{accuracy, progress, ratio_percent, Percent, ReviewProgress, Stats};

/// What a call to [`Session::advance`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// The next question was served in the current mode.
    Served(Question),
    /// Review mode started; this is the first review entry.
    ReviewEntered(Question),
    /// The review pass was not cleared and starts over.
    CycleRepeated {
        /// Zero-based pass counter after the repeat.
        cycle: u32,
        question: Question,
    },
    /// Review ended; Normal mode resumes with this question.
    ReviewExited(Question),
    /// The single-pass bank is exhausted.
    Finished,
    /// The fatigue limit was exceeded.
    Paused,
    /// Nothing happened because the session already ended in this mode.
    NoOp(SessionMode),
}

impl AdvanceOutcome {
    /// The question now being served, if any.
    pub fn question(&self) -> Option<&Question> {
        match self {
            AdvanceOutcome::Served(q)
            | AdvanceOutcome::ReviewEntered(q)
            | AdvanceOutcome::ReviewExited(q)
            | AdvanceOutcome::CycleRepeated { question: q, .. } => Some(q),
            AdvanceOutcome::Finished | AdvanceOutcome::Paused | AdvanceOutcome::NoOp(_) => None,
        }
    }
}

/// Where the current question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Bank(usize),
    Review(usize),
}

#[derive(Debug, Clone)]
struct Current {
    origin: Origin,
    question: Question,
    answered: bool,
}

/// One review episode: a fixed pool replayed pass by pass.
#[derive(Debug, Clone)]
struct ReviewCycle {
    pool: Vec<WrongAnswerRecord>,
    index: usize,
    /// False until the first entry has been served.
    started: bool,
    /// Zero-based pass counter.
    cycle: u32,
    /// Correctness of each pool entry in the current pass.
    pass_results: Vec<bool>,
    cycle_reviewed: usize,
    cycle_correct: usize,
}

impl ReviewCycle {
    fn new(pool: Vec<WrongAnswerRecord>) -> Self {
        let len = pool.len();
        Self {
            pool,
            index: 0,
            started: false,
            cycle: 0,
            pass_results: vec![false; len],
            cycle_reviewed: 0,
            cycle_correct: 0,
        }
    }

    fn cleared(&self) -> bool {
        self.pass_results.iter().all(|&ok| ok)
    }

    fn restart(&mut self) {
        self.cycle += 1;
        self.index = 0;
        self.pass_results.iter_mut().for_each(|ok| *ok = false);
        self.cycle_reviewed = 0;
        self.cycle_correct = 0;
    }

    fn record(&mut self, index: usize, correct: bool) {
        if let Some(slot) = self.pass_results.get_mut(index) {
            *slot = correct;
        }
        self.cycle_reviewed += 1;
        if correct {
            self.cycle_correct += 1;
        }
    }
}

#[derive(Debug, Clone, Default)]
enum Mode {
    #[default]
    Normal,
    Reviewing(ReviewCycle),
    Paused,
    Finished,
}

impl Mode {
    fn kind(&self) -> SessionMode {
        match self {
            Mode::Normal => SessionMode::Normal,
            Mode::Reviewing(_) => SessionMode::Reviewing,
            Mode::Paused => SessionMode::Paused,
            Mode::Finished => SessionMode::Finished,
        }
    }
}

/// The mutable core of a session. Replaced wholesale on load and reset.
#[derive(Debug, Clone, Default)]
struct SessionState {
    mode: Mode,
    /// Bank indices served in the current Normal-mode pass.
    used: BTreeSet<usize>,
    current: Option<Current>,
    reviewed: usize,
    correct: usize,
    /// Wrong answers since the last review episode ended.
    pending_wrong: Vec<WrongAnswerRecord>,
    /// Every distinct question answered wrong, in first-miss order.
    lifetime_wrong: Vec<WrongAnswerRecord>,
    /// Distinct bank indices scored in Normal mode.
    attempted: BTreeSet<usize>,
    repeated_review_entries: u32,
}

/// An adaptive review session over one question bank.
pub struct Session {
    config: SessionConfig,
    source: Box<dyn IndexSource>,
    exporter: Option<Box<dyn Exporter>>,
    bank: Option<QuestionBank>,
    state: SessionState,
    last_export: ExportStatus,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("bank_size", &self.bank.as_ref().map(QuestionBank::len))
            .field("mode", &self.state.mode.kind())
            .field("exporter", &self.exporter.is_some())
            .finish()
    }
}

impl Session {
    /// Create a session with entropy-seeded selection.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, entropy_source())
    }

    /// Create a session whose selection order is reproducible.
    pub fn with_seed(config: SessionConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_source(config, seeded_source(seed))
    }

    pub fn with_source(
        config: SessionConfig,
        source: Box<dyn IndexSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            source,
            exporter: None,
            bank: None,
            state: SessionState::default(),
            last_export: ExportStatus::NotAttempted,
        })
    }

    /// Export the wrong-answer artifact automatically when the session ends.
    #[must_use]
    pub fn with_exporter(mut self, exporter: Box<dyn Exporter>) -> Self {
        self.attach_exporter(exporter);
        self
    }

    pub fn attach_exporter(&mut self, exporter: Box<dyn Exporter>) {
        self.exporter = Some(exporter);
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn bank(&self) -> Option<&QuestionBank> {
        self.bank.as_ref()
    }

    pub fn mode(&self) -> SessionMode {
        self.state.mode.kind()
    }

    pub fn last_export(&self) -> &ExportStatus {
        &self.last_export
    }

    /// Every distinct question answered wrong so far.
    pub fn wrong_answers(&self) -> &[WrongAnswerRecord] {
        &self.state.lifetime_wrong
    }

    /// Parse `records` and replace the bank, resetting all session state.
    ///
    /// On failure the previous bank and state are left untouched.
    pub fn load_bank(&mut self, records: Vec<QuestionRecord>) -> Result<(), BankError> {
        match QuestionBank::from_records(records) {
            Ok(bank) => {
                self.install(bank);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("rejected question bank: {e}");
                Err(e)
            }
        }
    }

    /// Replace the bank with an already parsed one.
    pub fn install(&mut self, bank: QuestionBank) {
        tracing::info!(questions = bank.len(), "loaded question bank");
        self.bank = Some(bank);
        self.state = SessionState::default();
        self.last_export = ExportStatus::NotAttempted;
    }

    /// Start over on the same bank.
    pub fn reset(&mut self) {
        tracing::info!("session reset");
        self.state = SessionState::default();
        self.last_export = ExportStatus::NotAttempted;
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.state.current.as_ref().map(|c| &c.question)
    }

    /// True once the current question has been scored.
    pub fn is_answered(&self) -> bool {
        self.state.current.as_ref().is_some_and(|c| c.answered)
    }

    /// Score a submission for the current question.
    ///
    /// An empty or wrong selection is an ordinary incorrect answer.
    pub fn submit_answer<S: AsRef<str>>(
        &mut self,
        selected: &[S],
    ) -> Result<AttemptResult, SessionError> {
        if self.bank.is_none() {
            return Err(InvalidState::NoBank.into());
        }
        let current = self
            .state
            .current
            .as_mut()
            .ok_or(InvalidState::NoQuestion)?;
        if current.answered {
            return Err(InvalidState::AlreadyAnswered.into());
        }

        let labels = selected_labels(selected);
        let correct = is_correct(&current.question, &labels);
        current.answered = true;
        let origin = current.origin;
        let question = current.question.clone();

        match origin {
            Origin::Bank(bank_index) => {
                self.score_normal(bank_index, &question, &labels, correct);
            }
            Origin::Review(index) => {
                if let Mode::Reviewing(cycle) = &mut self.state.mode {
                    cycle.record(index, correct);
                }
            }
        }

        tracing::debug!(correct, review = matches!(origin, Origin::Review(_)), "scored answer");
        Ok(AttemptResult {
            question,
            selected: labels,
            correct,
            in_review: matches!(origin, Origin::Review(_)),
        })
    }

    fn score_normal(
        &mut self,
        bank_index: usize,
        question: &Question,
        labels: &BTreeSet<char>,
        correct: bool,
    ) {
        let state = &mut self.state;
        state.reviewed += 1;
        state.attempted.insert(bank_index);
        if correct {
            state.correct += 1;
            return;
        }

        let record = WrongAnswerRecord {
            bank_index,
            question: question.clone(),
            selected: labels.clone(),
        };
        if !state
            .lifetime_wrong
            .iter()
            .any(|w| w.bank_index == bank_index)
        {
            state.lifetime_wrong.push(record.clone());
        }
        state.pending_wrong.push(record);

        if self.should_enter_review() {
            self.enter_review();
        }
    }

    fn should_enter_review(&self) -> bool {
        let state = &self.state;
        matches!(state.mode, Mode::Normal)
            && ratio_percent(state.correct, state.reviewed) < self.config.review_threshold
            && state.pending_wrong.len() > self.config.wrong_answer_trigger
    }

    fn enter_review(&mut self) {
        let pool = std::mem::take(&mut self.state.pending_wrong);
        tracing::info!(
            pool = pool.len(),
            accuracy = %accuracy(self.state.correct, self.state.reviewed),
            "entering review mode"
        );
        self.state.mode = Mode::Reviewing(ReviewCycle::new(pool));
    }

    /// Move to the next question, changing mode when a transition is due.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        if self.bank.is_none() {
            return Err(InvalidState::NoBank.into());
        }

        let outcome = match std::mem::take(&mut self.state.mode) {
            Mode::Normal => self.serve_from_bank(),
            Mode::Reviewing(cycle) => self.advance_review(cycle),
            ended @ (Mode::Paused | Mode::Finished) => {
                let kind = ended.kind();
                self.state.mode = ended;
                tracing::debug!(mode = %kind, "advance ignored");
                AdvanceOutcome::NoOp(kind)
            }
        };
        Ok(outcome)
    }

    /// Draw from the Normal pool. Expects the mode to already be Normal.
    fn serve_from_bank(&mut self) -> AdvanceOutcome {
        let Some(bank) = self.bank.as_ref() else {
            return self.finish();
        };

        let mut selection = select_next(bank.len(), &self.state.used, self.source.as_mut());
        if selection == Selection::Exhausted && self.config.cyclic {
            tracing::debug!("bank exhausted, reshuffling");
            self.state.used.clear();
            selection = select_next(bank.len(), &self.state.used, self.source.as_mut());
        }

        let picked = match selection {
            Selection::Picked(index) => bank.get(index).cloned().map(|q| (index, q)),
            Selection::Exhausted => None,
        };

        match picked {
            Some((index, question)) => {
                self.state.used.insert(index);
                self.state.current = Some(Current {
                    origin: Origin::Bank(index),
                    question: question.clone(),
                    answered: false,
                });
                AdvanceOutcome::Served(question)
            }
            None => self.finish(),
        }
    }

    fn advance_review(&mut self, mut cycle: ReviewCycle) -> AdvanceOutcome {
        if !cycle.started {
            cycle.started = true;
            let question = self.serve_review(cycle);
            return AdvanceOutcome::ReviewEntered(question);
        }

        cycle.index += 1;
        if cycle.index < cycle.pool.len() {
            return AdvanceOutcome::Served(self.serve_review(cycle));
        }

        let cleared = cycle.cleared();
        if !cleared && cycle.cycle + 1 < self.config.max_review_cycles {
            cycle.restart();
            let pass = cycle.cycle;
            tracing::info!(cycle = pass, "review pass not cleared, repeating");
            let question = self.serve_review(cycle);
            return AdvanceOutcome::CycleRepeated {
                cycle: pass,
                question,
            };
        }

        self.exit_review(cleared, cycle.cycle)
    }

    /// Serve `cycle.pool[cycle.index]` and store the cycle as the mode.
    fn serve_review(&mut self, cycle: ReviewCycle) -> Question {
        let index = cycle.index;
        let question = cycle.pool[index].question.clone();
        self.state.current = Some(Current {
            origin: Origin::Review(index),
            question: question.clone(),
            answered: false,
        });
        self.state.mode = Mode::Reviewing(cycle);
        question
    }

    fn exit_review(&mut self, cleared: bool, cycle: u32) -> AdvanceOutcome {
        self.state.mode = Mode::Normal;
        self.state.repeated_review_entries += 1;
        tracing::info!(
            cleared,
            passes = cycle + 1,
            episodes = self.state.repeated_review_entries,
            "leaving review mode"
        );

        if let Some(limit) = self.config.repeated_review_limit {
            if self.state.repeated_review_entries > limit {
                return self.pause();
            }
        }

        match self.serve_from_bank() {
            AdvanceOutcome::Served(question) => AdvanceOutcome::ReviewExited(question),
            other => other,
        }
    }

    fn finish(&mut self) -> AdvanceOutcome {
        tracing::info!(reviewed = self.state.reviewed, "question bank finished");
        self.end(Mode::Finished);
        AdvanceOutcome::Finished
    }

    fn pause(&mut self) -> AdvanceOutcome {
        tracing::info!(
            episodes = self.state.repeated_review_entries,
            "review fatigue limit reached, pausing"
        );
        self.end(Mode::Paused);
        AdvanceOutcome::Paused
    }

    fn end(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.state.current = None;
        self.run_export();
    }

    fn run_export(&mut self) {
        let Some(exporter) = self.exporter.as_ref() else {
            return;
        };
        let artifact = self.export_artifact();
        if artifact.is_empty() {
            self.last_export = ExportStatus::NothingToExport;
            return;
        }

        self.last_export = match exporter.export(&artifact) {
            Ok(path) => {
                tracing::info!(path = %path.display(), records = artifact.records.len(), "exported wrong answers");
                ExportStatus::Written(path)
            }
            Err(e) => {
                tracing::warn!("failed to export wrong answers: {e}");
                ExportStatus::Failed(e.to_string())
            }
        };
    }

    /// The raw records of every question answered wrong, stamped now.
    pub fn export_artifact(&self) -> ExportArtifact {
        let records = match &self.bank {
            Some(bank) => self
                .state
                .lifetime_wrong
                .iter()
                .filter_map(|w| bank.record(w.bank_index).cloned())
                .collect(),
            None => Vec::new(),
        };
        ExportArtifact::new(records, chrono::Local::now())
    }

    /// Export through an explicit exporter, independent of session end.
    pub fn export_with(&self, exporter: &dyn Exporter) -> Result<PathBuf, ExportError> {
        exporter.export(&self.export_artifact())
    }

    /// Current counters and derived statistics.
    pub fn stats(&self) -> Stats {
        let state = &self.state;
        let bank_size = self.bank.as_ref().map_or(0, QuestionBank::len);

        let (review_cycle_count, review) = match &state.mode {
            Mode::Reviewing(cycle) => (
                cycle.cycle,
                Some(ReviewProgress {
                    position: if cycle.started { cycle.index + 1 } else { 0 },
                    pool_size: cycle.pool.len(),
                    cycle: cycle.cycle + 1,
                    max_cycles: self.config.max_review_cycles,
                    cycle_reviewed: cycle.cycle_reviewed,
                    cycle_correct: cycle.cycle_correct,
                }),
            ),
            _ => (0, None),
        };

        let attempted = state.attempted.len();
        let final_score = if attempted == 0 {
            Percent::ZERO
        } else {
            Percent::of(attempted.saturating_sub(state.lifetime_wrong.len()), attempted)
        };

        Stats {
            mode: state.mode.kind(),
            bank_size,
            reviewed: state.reviewed,
            correct: state.correct,
            accuracy: accuracy(state.correct, state.reviewed),
            progress: progress(state.reviewed, bank_size),
            review_cycle_count,
            review,
            pending_wrong: state.pending_wrong.len(),
            lifetime_wrong: state.lifetime_wrong.len(),
            repeated_review_entries: state.repeated_review_entries,
            final_score,
        }
    }
}
