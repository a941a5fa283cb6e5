use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of a multiple-choice alternative ("A".."E" on the page).
///
/// Selections are opaque: any label can be recorded, and grading compares
/// labels by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionLabel(String);

impl OptionLabel {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OptionLabel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OptionLabel {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
