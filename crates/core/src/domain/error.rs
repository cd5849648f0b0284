use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("invalid is_good value: {0}. must be 0 or 1")]
    InvalidAnswerFlag(i32),
}
