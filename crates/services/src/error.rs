//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionId;

/// Errors emitted by quiz sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question {0} is not part of the answer key")]
    UnknownQuestion(QuestionId),
    #[error("failed to serialize stats export")]
    Export(#[from] serde_json::Error),
}
