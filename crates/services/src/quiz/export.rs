use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use quiz_core::model::{QuestionId, QuestionState, QuizStats};

use crate::error::SessionError;

/// Detailed stats document: aggregates, every question state and when it was taken.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsExport {
    #[serde(flatten)]
    stats: QuizStats,
    questions: BTreeMap<QuestionId, QuestionState>,
    exported_at: DateTime<Utc>,
}

impl StatsExport {
    #[must_use]
    pub fn new(
        stats: QuizStats,
        questions: BTreeMap<QuestionId, QuestionState>,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            stats,
            questions,
            exported_at,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &QuizStats {
        &self.stats
    }

    #[must_use]
    pub fn questions(&self) -> &BTreeMap<QuestionId, QuestionState> {
        &self.questions
    }

    #[must_use]
    pub fn exported_at(&self) -> DateTime<Utc> {
        self.exported_at
    }

    /// Render as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Export` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
