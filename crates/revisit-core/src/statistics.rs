//! Running session statistics.
//!
//! Everything here is derived from session counters by pure functions; no
//! statistic is cached or updated as a side effect of being read.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::SessionMode;

/// A percentage rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(f64);

impl Percent {
    pub const ZERO: Percent = Percent(0.0);

    /// `part / whole` as a percentage, `0` when `whole` is zero.
    pub fn of(part: usize, whole: usize) -> Self {
        Percent((ratio_percent(part, whole) * 100.0).round() / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Unrounded `part / whole * 100`, `0` when `whole` is zero.
pub fn ratio_percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Share of scored Normal-mode attempts that were correct.
pub fn accuracy(correct: usize, reviewed: usize) -> Percent {
    Percent::of(correct, reviewed)
}

/// Scored Normal-mode attempts relative to the bank size. Exceeds 100 in
/// a cyclic session once the bank has been reshuffled.
pub fn progress(reviewed: usize, bank_size: usize) -> Percent {
    Percent::of(reviewed, bank_size)
}

/// Where the session stands inside the active review pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewProgress {
    /// One-based position of the entry being served.
    pub position: usize,
    /// Entries in the review pool.
    pub pool_size: usize,
    /// One-based pass number.
    pub cycle: u32,
    /// Configured number of passes.
    pub max_cycles: u32,
    /// Review attempts scored in this pass.
    pub cycle_reviewed: usize,
    /// Correct review attempts in this pass.
    pub cycle_correct: usize,
}

impl ReviewProgress {
    pub fn cycle_accuracy(&self) -> Percent {
        accuracy(self.cycle_correct, self.cycle_reviewed)
    }
}

/// Snapshot of the session counters and everything derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub mode: SessionMode,
    pub bank_size: usize,
    /// Normal-mode attempts scored. Review attempts are not counted.
    pub reviewed: usize,
    /// Correct Normal-mode attempts.
    pub correct: usize,
    pub accuracy: Percent,
    pub progress: Percent,
    /// Zero-based pass counter of the active review pool.
    pub review_cycle_count: u32,
    pub review: Option<ReviewProgress>,
    /// Wrong answers waiting for the next review pool.
    pub pending_wrong: usize,
    /// Distinct questions ever answered wrong.
    pub lifetime_wrong: usize,
    /// Times the session has completed a review episode.
    pub repeated_review_entries: u32,
    /// Share of distinct attempted questions never answered wrong.
    pub final_score: Percent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_zero_when_nothing_reviewed() {
        assert_eq!(accuracy(0, 0), Percent::ZERO);
        assert_eq!(accuracy(0, 0).to_string(), "0.00");
    }

    #[test]
    fn percent_rounds_to_two_places() {
        assert_eq!(accuracy(1, 3).to_string(), "33.33");
        assert_eq!(accuracy(2, 3).to_string(), "66.67");
        assert_eq!(accuracy(10, 10).to_string(), "100.00");
        assert!((accuracy(1, 7).value() - 14.29).abs() < 1e-9);
    }

    #[test]
    fn ratio_is_unrounded() {
        let r = ratio_percent(1, 3);
        assert!(r > 33.33 && r < 33.34);
        assert_eq!(ratio_percent(5, 0), 0.0);
    }

    #[test]
    fn progress_can_exceed_full_bank() {
        assert_eq!(progress(5, 10).to_string(), "50.00");
        assert_eq!(progress(15, 10).to_string(), "150.00");
    }

    #[test]
    fn percent_serializes_as_number() {
        assert_eq!(serde_json::to_string(&accuracy(1, 4)).unwrap(), "25.0");
    }
}
