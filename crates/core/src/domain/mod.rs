mod answer_flag;
mod error;
mod ids;
mod progress;
mod text;

pub use answer_flag::AnswerFlag;
pub use error::DomainError;
pub use ids::{AdminId, AnswerId, LevelId, QuestionId, UserId};
pub use progress::Progress;
pub use text::{AnswerText, Login, LevelName, Password, QuestionText};
