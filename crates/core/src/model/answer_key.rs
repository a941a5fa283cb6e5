use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ParseIdError, QuestionId};
use crate::model::option::OptionLabel;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerKeyError {
    #[error("answer key must contain at least one question")]
    Empty,

    #[error("question {0} appears more than once in the answer key")]
    DuplicateQuestion(QuestionId),

    #[error("answer for question {0} cannot be empty")]
    EmptyLabel(QuestionId),

    #[error("malformed answer key entry {entry:?}, expected <question>=<option>")]
    MalformedEntry { entry: String },

    #[error("invalid question id in entry {entry:?}")]
    InvalidQuestionId {
        entry: String,
        #[source]
        source: ParseIdError,
    },
}

//
// ─── ANSWER KEY ────────────────────────────────────────────────────────────────
//

/// Immutable mapping from question to its correct option.
///
/// Iterates in ascending question order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<QuestionId, String>",
    into = "BTreeMap<QuestionId, String>"
)]
pub struct AnswerKey {
    answers: BTreeMap<QuestionId, OptionLabel>,
}

impl AnswerKey {
    /// Build an answer key from `(question, option)` pairs.
    ///
    /// Option labels are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `AnswerKeyError::Empty` when no pairs are given,
    /// `AnswerKeyError::DuplicateQuestion` when an id repeats and
    /// `AnswerKeyError::EmptyLabel` for a blank option.
    pub fn new(
        entries: impl IntoIterator<Item = (QuestionId, OptionLabel)>,
    ) -> Result<Self, AnswerKeyError> {
        let mut answers = BTreeMap::new();
        for (question, label) in entries {
            let trimmed = label.as_str().trim();
            if trimmed.is_empty() {
                return Err(AnswerKeyError::EmptyLabel(question));
            }
            if answers
                .insert(question, OptionLabel::new(trimmed))
                .is_some()
            {
                return Err(AnswerKeyError::DuplicateQuestion(question));
            }
        }

        if answers.is_empty() {
            return Err(AnswerKeyError::Empty);
        }

        Ok(Self { answers })
    }

    /// The answer key shipped with the Banca Exata page.
    #[must_use]
    pub fn banca_exata() -> Self {
        const ANSWERS: [(u64, &str); 8] = [
            (1, "B"),
            (2, "D"),
            (3, "D"),
            (4, "C"),
            (5, "B"),
            (6, "C"),
            (7, "D"),
            (8, "E"),
        ];

        let answers = ANSWERS
            .iter()
            .map(|&(id, label)| (QuestionId(id), OptionLabel::new(label)))
            .collect();
        Self { answers }
    }

    #[must_use]
    pub fn get(&self, question: QuestionId) -> Option<&OptionLabel> {
        self.answers.get(&question)
    }

    /// Number of questions in the key.
    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.answers.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &OptionLabel)> + '_ {
        self.answers.iter().map(|(id, label)| (*id, label))
    }
}

/// Parses the inline form `1=B, 2=D, 3=D`.
impl FromStr for AnswerKey {
    type Err = AnswerKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();
        for raw in s.split(',') {
            let entry = raw.trim();
            if entry.is_empty() {
                continue;
            }
            let Some((id, label)) = entry.split_once('=') else {
                return Err(AnswerKeyError::MalformedEntry {
                    entry: entry.to_string(),
                });
            };
            let question =
                id.parse::<QuestionId>()
                    .map_err(|source| AnswerKeyError::InvalidQuestionId {
                        entry: entry.to_string(),
                        source,
                    })?;
            entries.push((question, OptionLabel::new(label)));
        }
        Self::new(entries)
    }
}

impl TryFrom<BTreeMap<QuestionId, String>> for AnswerKey {
    type Error = AnswerKeyError;

    fn try_from(value: BTreeMap<QuestionId, String>) -> Result<Self, Self::Error> {
        Self::new(
            value
                .into_iter()
                .map(|(id, label)| (id, OptionLabel::from(label))),
        )
    }
}

impl From<AnswerKey> for BTreeMap<QuestionId, String> {
    fn from(key: AnswerKey) -> Self {
        key.answers
            .into_iter()
            .map(|(id, label)| (id, label.as_str().to_string()))
            .collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(id: u64) -> QuestionId {
        QuestionId::new(id).unwrap()
    }

    #[test]
    fn builtin_key_matches_the_page() {
        let key = AnswerKey::banca_exata();
        assert_eq!(key.len(), 8);
        assert_eq!(key.get(qid(1)).unwrap().as_str(), "B");
        assert_eq!(key.get(qid(8)).unwrap().as_str(), "E");
        assert!(key.get(qid(9)).is_none());
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = AnswerKey::new(Vec::new()).unwrap_err();
        assert_eq!(err, AnswerKeyError::Empty);
    }

    #[test]
    fn duplicate_question_is_rejected() {
        let err = AnswerKey::new(vec![
            (qid(1), OptionLabel::from("A")),
            (qid(1), OptionLabel::from("B")),
        ])
        .unwrap_err();
        assert_eq!(err, AnswerKeyError::DuplicateQuestion(qid(1)));
    }

    #[test]
    fn labels_are_trimmed_and_must_not_be_blank() {
        let key = AnswerKey::new(vec![(qid(2), OptionLabel::from(" C "))]).unwrap();
        assert_eq!(key.get(qid(2)).unwrap().as_str(), "C");

        let err = AnswerKey::new(vec![(qid(2), OptionLabel::from("  "))]).unwrap_err();
        assert_eq!(err, AnswerKeyError::EmptyLabel(qid(2)));
    }

    #[test]
    fn parses_inline_form() {
        let key: AnswerKey = "2=D, 1=B,".parse().unwrap();
        let ids: Vec<u64> = key.question_ids().map(|id| id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(key.get(qid(2)).unwrap().as_str(), "D");
    }

    #[test]
    fn inline_form_reports_bad_entries() {
        assert!(matches!(
            "1B".parse::<AnswerKey>(),
            Err(AnswerKeyError::MalformedEntry { .. })
        ));
        assert!(matches!(
            "0=B".parse::<AnswerKey>(),
            Err(AnswerKeyError::InvalidQuestionId {
                source: ParseIdError::Zero,
                ..
            })
        ));
        assert_eq!("".parse::<AnswerKey>(), Err(AnswerKeyError::Empty));
    }

    #[test]
    fn json_object_form() {
        let key: AnswerKey = serde_json::from_str(r#"{"1": "B", "2": "D"}"#).unwrap();
        assert_eq!(key.len(), 2);
        assert_eq!(key.get(qid(2)).unwrap().as_str(), "D");

        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"{"1":"B","2":"D"}"#);

        assert!(serde_json::from_str::<AnswerKey>("{}").is_err());
        assert!(serde_json::from_str::<AnswerKey>(r#"{"1": " "}"#).is_err());
    }
}
