use serde::{Deserialize, Serialize};

use crate::model::option::OptionLabel;

//
// ─── CORRECTNESS ───────────────────────────────────────────────────────────────
//

/// Grading outcome of a question.
///
/// Only a hidden-to-shown transition sets this. `Unknown` covers questions that
/// were never revealed and questions revealed without a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Correctness {
    #[default]
    Unknown,
    Correct,
    Incorrect,
}

impl Correctness {
    #[must_use]
    pub fn from_match(matches: bool) -> Self {
        if matches {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

//
// ─── TRANSITIONS ───────────────────────────────────────────────────────────────
//

/// What a reveal toggle did to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTransition {
    /// The answer was shown and is now hidden; grading is kept as-is.
    Hidden,
    /// The answer was hidden and is now shown, graded fresh.
    Shown(Correctness),
}

impl RevealTransition {
    #[must_use]
    pub fn is_revealed(self) -> bool {
        matches!(self, Self::Shown(_))
    }
}

/// Feedback for one alternative, as the page styles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionMark {
    Neutral,
    Selected,
    Correct,
    Incorrect,
}

//
// ─── QUESTION STATE ────────────────────────────────────────────────────────────
//

/// Per-question record of selection, visibility and grading.
///
/// Only built through `Default` and the transition methods, so its flags
/// always agree with each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestionState {
    selected_option: Option<OptionLabel>,
    answered: bool,
    correct: Correctness,
    revealed: bool,
    viewed: bool,
}

impl QuestionState {
    #[must_use]
    pub fn selected_option(&self) -> Option<&OptionLabel> {
        self.selected_option.as_ref()
    }

    #[must_use]
    pub fn answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn correct(&self) -> Correctness {
        self.correct
    }

    #[must_use]
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn viewed(&self) -> bool {
        self.viewed
    }

    /// Record `option` as the current selection, replacing any previous one.
    ///
    /// Visibility and grading are left untouched.
    pub fn select(&mut self, option: OptionLabel) {
        self.selected_option = Some(option);
        self.answered = true;
    }

    /// Flip answer visibility.
    ///
    /// Showing grades the current selection against `answer`; hiding keeps the
    /// last grade.
    pub fn toggle_reveal(&mut self, answer: &OptionLabel) -> RevealTransition {
        if self.revealed {
            self.revealed = false;
            return RevealTransition::Hidden;
        }

        self.revealed = true;
        self.viewed = true;
        self.correct = match &self.selected_option {
            Some(selected) => Correctness::from_match(selected == answer),
            None => Correctness::Unknown,
        };
        RevealTransition::Shown(self.correct)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feedback for `option` given the correct `answer`.
    #[must_use]
    pub fn mark_for(&self, option: &OptionLabel, answer: &OptionLabel) -> OptionMark {
        let is_selected = self.selected_option.as_ref() == Some(option);
        if !self.revealed {
            return if is_selected {
                OptionMark::Selected
            } else {
                OptionMark::Neutral
            };
        }

        if option == answer {
            OptionMark::Correct
        } else if is_selected {
            OptionMark::Incorrect
        } else {
            OptionMark::Neutral
        }
    }

    /// Render-ready view; `answer` is only surfaced while revealed.
    #[must_use]
    pub fn display(&self, answer: &OptionLabel) -> DisplayState {
        DisplayState {
            selected_option: self.selected_option.clone(),
            answered: self.answered,
            correct: self.correct,
            revealed: self.revealed,
            viewed: self.viewed,
            answer: self.revealed.then(|| answer.clone()),
        }
    }
}

/// Snapshot of one question for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub selected_option: Option<OptionLabel>,
    pub answered: bool,
    pub correct: Correctness,
    pub revealed: bool,
    pub viewed: bool,
    pub answer: Option<OptionLabel>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
