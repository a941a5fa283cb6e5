use serde::Serialize;

use crate::model::question::QuestionState;

/// Aggregate counters over every question of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizStats {
    pub total: usize,
    pub answered_count: usize,
    pub correct_count: usize,
    pub viewed_count: usize,
    /// `correct / answered * 100`, one decimal; `0.0` when nothing is answered.
    pub accuracy_percent: f64,
}

impl QuizStats {
    /// Tally the given question states.
    pub fn from_states<'a>(states: impl IntoIterator<Item = &'a QuestionState>) -> Self {
        let mut total = 0_usize;
        let mut answered_count = 0_usize;
        let mut correct_count = 0_usize;
        let mut viewed_count = 0_usize;

        for state in states {
            total += 1;
            if state.answered() {
                answered_count += 1;
            }
            if state.correct().is_correct() {
                correct_count += 1;
            }
            if state.viewed() {
                viewed_count += 1;
            }
        }

        Self {
            total,
            answered_count,
            correct_count,
            viewed_count,
            accuracy_percent: accuracy_percent(correct_count, answered_count),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn accuracy_percent(correct: usize, answered: usize) -> f64 {
    if answered == 0 {
        return 0.0;
    }
    let tenths = (correct as f64 / answered as f64 * 1000.0).round();
    tenths / 10.0
}
