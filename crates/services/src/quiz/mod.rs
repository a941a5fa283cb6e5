mod export;
mod service;
mod shared;

// Public API of the quiz subsystem.
pub use crate::error::SessionError;
pub use export::StatsExport;
pub use service::QuizSession;
pub use shared::SharedQuizSession;
