//! Thread-safe session handle.
//!
//! Hosts that drive one session from several threads (a UI thread and a
//! timer, say) share a [`SharedSession`]. Every call takes the lock for its
//! whole duration, so transitions never interleave.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{BankError, SessionError};
use crate::model::{AttemptResult, Question, QuestionRecord, SessionMode};
use crate::session::{AdvanceOutcome, Session};
use crate::statistics::Stats;

/// A cloneable handle to one [`Session`].
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Lock the session for a sequence of calls.
    ///
    /// A panic in another holder does not leave the session unusable: every
    /// transition completes before it returns, so the state is still valid.
    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn load_bank(&self, records: Vec<QuestionRecord>) -> Result<(), BankError> {
        self.lock().load_bank(records)
    }

    pub fn current_question(&self) -> Option<Question> {
        self.lock().current_question().cloned()
    }

    pub fn submit_answer<S: AsRef<str>>(
        &self,
        selected: &[S],
    ) -> Result<AttemptResult, SessionError> {
        self.lock().submit_answer(selected)
    }

    pub fn advance(&self) -> Result<AdvanceOutcome, SessionError> {
        self.lock().advance()
    }

    pub fn stats(&self) -> Stats {
        self.lock().stats()
    }

    pub fn mode(&self) -> SessionMode {
        self.lock().mode()
    }

    pub fn reset(&self) {
        self.lock().reset();
    }
}

impl From<Session> for SharedSession {
    fn from(session: Session) -> Self {
        Self::new(session)
    }
}
