mod answer_key;
mod ids;
mod option;
mod question;
mod stats;

pub use answer_key::{AnswerKey, AnswerKeyError};
pub use ids::{ParseIdError, QuestionId};
pub use option::OptionLabel;
pub use question::{Correctness, DisplayState, OptionMark, QuestionState, RevealTransition};
pub use stats::QuizStats;
