use std::collections::BTreeMap;

use quiz_core::Clock;
use quiz_core::model::{
    AnswerKey, DisplayState, OptionLabel, OptionMark, QuestionId, QuestionState, QuizStats,
    RevealTransition,
};

use super::export::StatsExport;
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session for one visitor.
///
/// Owns the answer key and one `QuestionState` per key entry. Selections are
/// stored as-is and only graded when an answer goes from hidden to shown.
#[derive(Debug, Clone)]
pub struct QuizSession {
    key: AnswerKey,
    states: BTreeMap<QuestionId, QuestionState>,
}

impl QuizSession {
    /// Start a session with every question in its initial state.
    #[must_use]
    pub fn new(key: AnswerKey) -> Self {
        let states = key
            .question_ids()
            .map(|id| (id, QuestionState::default()))
            .collect();
        Self { key, states }
    }

    #[must_use]
    pub fn answer_key(&self) -> &AnswerKey {
        &self.key
    }

    /// Record `option` as the visitor's pick for `question`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` if `question` is not in the key.
    pub fn record_selection(
        &mut self,
        question: QuestionId,
        option: impl Into<OptionLabel>,
    ) -> Result<(), SessionError> {
        let (_, state) = self.parts_mut(question)?;
        state.select(option.into());
        Ok(())
    }

    /// Flip the annotated answer of `question` and return whether it is now shown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` if `question` is not in the key.
    pub fn toggle_reveal(&mut self, question: QuestionId) -> Result<bool, SessionError> {
        let (answer, state) = self.parts_mut(question)?;
        let transition = state.toggle_reveal(answer);
        trace_transition(question, state, answer, transition);
        Ok(transition.is_revealed())
    }

    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` if `question` is not in the key.
    pub fn display_state(&self, question: QuestionId) -> Result<DisplayState, SessionError> {
        let (answer, state) = self.parts(question)?;
        Ok(state.display(answer))
    }

    /// Feedback for a single alternative of `question`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` if `question` is not in the key.
    pub fn option_feedback(
        &self,
        question: QuestionId,
        option: &OptionLabel,
    ) -> Result<OptionMark, SessionError> {
        let (answer, state) = self.parts(question)?;
        Ok(state.mark_for(option, answer))
    }

    #[must_use]
    pub fn stats(&self) -> QuizStats {
        QuizStats::from_states(self.states.values())
    }

    /// Put every question back into its initial state.
    pub fn reset_all(&mut self) {
        for state in self.states.values_mut() {
            state.reset();
        }
        tracing::info!(questions = self.states.len(), "quiz session reset");
    }

    /// Show or hide every answer, toggling only questions not already in the
    /// requested state. Returns how many questions changed.
    pub fn set_all_revealed(&mut self, show: bool) -> usize {
        let mut changed = 0;
        // `states` holds exactly the key's ids; both maps iterate in ascending order.
        for ((question, answer), state) in self.key.iter().zip(self.states.values_mut()) {
            if state.revealed() == show {
                continue;
            }
            let transition = state.toggle_reveal(answer);
            trace_transition(question, state, answer, transition);
            changed += 1;
        }
        tracing::info!(show, changed, "bulk reveal applied");
        changed
    }

    /// Copy of every question state, ordered by id.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<QuestionId, QuestionState> {
        self.states.clone()
    }

    /// Stats plus every question state, stamped with `clock`.
    #[must_use]
    pub fn export(&self, clock: &Clock) -> StatsExport {
        StatsExport::new(self.stats(), self.snapshot(), clock.now())
    }

    fn parts(&self, question: QuestionId) -> Result<(&OptionLabel, &QuestionState), SessionError> {
        let answer = self
            .key
            .get(question)
            .ok_or(SessionError::UnknownQuestion(question))?;
        let state = self
            .states
            .get(&question)
            .ok_or(SessionError::UnknownQuestion(question))?;
        Ok((answer, state))
    }

    fn parts_mut(
        &mut self,
        question: QuestionId,
    ) -> Result<(&OptionLabel, &mut QuestionState), SessionError> {
        let answer = self
            .key
            .get(question)
            .ok_or(SessionError::UnknownQuestion(question))?;
        let state = self
            .states
            .get_mut(&question)
            .ok_or(SessionError::UnknownQuestion(question))?;
        Ok((answer, state))
    }
}

fn trace_transition(
    question: QuestionId,
    state: &QuestionState,
    answer: &OptionLabel,
    transition: RevealTransition,
) {
    match transition {
        RevealTransition::Shown(outcome) => tracing::debug!(
            %question,
            selected = state.selected_option().map(OptionLabel::as_str),
            expected = %answer,
            ?outcome,
            "answer revealed"
        ),
        RevealTransition::Hidden => tracing::debug!(%question, "answer hidden"),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
