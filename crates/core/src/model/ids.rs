use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for building a `QuestionId` from a raw value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("question id must be >= 1")]
    Zero,

    #[error("failed to parse question id from {raw:?}")]
    NotANumber { raw: String },
}

/// Positive identifier of a question on the page (1..N).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct QuestionId(pub(crate) u64);

impl QuestionId {
    /// Creates a new `QuestionId`.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError::Zero` for `0`.
    pub fn new(id: u64) -> Result<Self, ParseIdError> {
        if id == 0 {
            return Err(ParseIdError::Zero);
        }
        Ok(Self(id))
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for QuestionId {
    type Error = ParseIdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuestionId> for u64 {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<u64>()
            .map_err(|_| ParseIdError::NotANumber {
                raw: trimmed.to_string(),
            })?;
        Self::new(value)
    }
}
