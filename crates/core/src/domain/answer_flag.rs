use super::DomainError;

/// Whether an answer is the correct one for its question.
///
/// Stored as a compact `0/1` integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnswerFlag {
    #[default]
    Wrong,
    Correct,
}

impl AnswerFlag {
    pub fn code(self) -> i32 {
        match self {
            AnswerFlag::Wrong => 0,
            AnswerFlag::Correct => 1,
        }
    }

    pub fn is_correct(self) -> bool {
        self == AnswerFlag::Correct
    }
}

impl TryFrom<i32> for AnswerFlag {
    type Error = DomainError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(AnswerFlag::Wrong),
            1 => Ok(AnswerFlag::Correct),
            _ => Err(DomainError::InvalidAnswerFlag(code)),
        }
    }
}

impl From<AnswerFlag> for i32 {
    fn from(value: AnswerFlag) -> Self {
        value.code()
    }
}
