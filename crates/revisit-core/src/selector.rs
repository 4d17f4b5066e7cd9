//! No-repeat random selection over a question pool.
//!
//! The selector is stateless: it looks at which indices are already used
//! and picks one of the rest. What to do once everything is used is left
//! to the session.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices.
///
/// Implemented for every [`rand::Rng`], so a seeded [`StdRng`] gives
/// reproducible selection order in tests.
pub trait IndexSource: Send {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng + Send> IndexSource for R {
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Entropy-seeded index source for interactive sessions.
pub fn entropy_source() -> Box<dyn IndexSource> {
    Box::new(StdRng::from_os_rng())
}

/// Deterministic index source.
pub fn seeded_source(seed: u64) -> Box<dyn IndexSource> {
    Box::new(StdRng::seed_from_u64(seed))
}

/// Outcome of one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Index into the pool that was chosen.
    Picked(usize),
    /// Every index of the pool is already used.
    Exhausted,
}

/// Choose uniformly among the pool indices not in `used`.
pub fn select_next(
    pool_len: usize,
    used: &BTreeSet<usize>,
    source: &mut dyn IndexSource,
) -> Selection {
    let candidates: Vec<usize> = (0..pool_len).filter(|i| !used.contains(i)).collect();
    if candidates.is_empty() {
        return Selection::Exhausted;
    }

    let chosen = candidates[source.pick(candidates.len())];
    tracing::debug!(
        index = chosen,
        remaining = candidates.len() - 1,
        "selected question"
    );
    Selection::Picked(chosen)
}
