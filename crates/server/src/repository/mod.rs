//! Persistence seam: one trait per aggregate, each backed by sea-orm.

mod admin_repository;
mod answer_repository;
mod level_repository;
mod question_repository;
mod user_repository;

pub use admin_repository::{
    AdminChanges, AdminRecord, AdminRepository, NewAdmin, SeaOrmAdminRepository,
};
pub use answer_repository::{AnswerRecord, AnswerRepository, NewAnswer, SeaOrmAnswerRepository};
pub use level_repository::{LevelRecord, LevelRepository, LevelSummary, SeaOrmLevelRepository};
pub use question_repository::{
    NewQuestion, QuestionRecord, QuestionRepository, QuestionWithAnswers, SeaOrmQuestionRepository,
};
pub use user_repository::{NewUser, SeaOrmUserRepository, UserChanges, UserRecord, UserRepository};

use fiszki_core::domain::DomainError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique key (login, level name) is already taken.
    #[error("{0}")]
    Conflict(&'static str),

    /// The row a new child row should point at does not exist.
    #[error("{0} not found")]
    ParentNotFound(&'static str),

    #[error("invalid row in database: {0}")]
    CorruptRow(#[from] DomainError),

    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Maps a unique-constraint violation raised by the database to `Conflict`,
/// for writes that race past the application-level existence check.
pub(crate) fn conflict_on_unique(message: &'static str) -> impl FnOnce(DbErr) -> RepositoryError {
    move |err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RepositoryError::Conflict(message),
        _ => RepositoryError::Db(err),
    }
}
