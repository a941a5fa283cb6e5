use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_core::Clock;
use quiz_core::model::{
    AnswerKey, DisplayState, OptionLabel, OptionMark, QuestionId, QuestionState, QuizStats,
};

use super::export::StatsExport;
use super::service::QuizSession;
use crate::error::SessionError;

/// Cloneable handle to one `QuizSession` shared between threads.
///
/// Every call holds the lock for its whole duration, so each operation is
/// applied atomically with respect to other handles.
#[derive(Debug, Clone)]
pub struct SharedQuizSession {
    inner: Arc<Mutex<QuizSession>>,
}

impl SharedQuizSession {
    #[must_use]
    pub fn new(key: AnswerKey) -> Self {
        Self::from_session(QuizSession::new(key))
    }

    #[must_use]
    pub fn from_session(session: QuizSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` if `question` is not in the key.
    pub fn record_selection(
        &self,
        question: QuestionId,
        option: impl Into<OptionLabel>,
    ) -> Result<(), SessionError> {
        self.lock().record_selection(question, option)
    }

    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` if `question` is not in the key.
    pub fn toggle_reveal(&self, question: QuestionId) -> Result<bool, SessionError> {
        self.lock().toggle_reveal(question)
    }

    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` if `question` is not in the key.
    pub fn display_state(&self, question: QuestionId) -> Result<DisplayState, SessionError> {
        self.lock().display_state(question)
    }

    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` if `question` is not in the key.
    pub fn option_feedback(
        &self,
        question: QuestionId,
        option: &OptionLabel,
    ) -> Result<OptionMark, SessionError> {
        self.lock().option_feedback(question, option)
    }

    #[must_use]
    pub fn stats(&self) -> QuizStats {
        self.lock().stats()
    }

    pub fn reset_all(&self) {
        self.lock().reset_all();
    }

    pub fn set_all_revealed(&self, show: bool) -> usize {
        self.lock().set_all_revealed(show)
    }

    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<QuestionId, QuestionState> {
        self.lock().snapshot()
    }

    #[must_use]
    pub fn export(&self, clock: &Clock) -> StatsExport {
        self.lock().export(clock)
    }

    // No operation can panic between field writes, so a poisoned session is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, QuizSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
