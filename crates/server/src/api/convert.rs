//! Repository records to wire representations.

use fiszki_api_types::{AdminLevelOut, AdminOut, AnswerOut, LevelOut, QuestionOut, UserOut};

use crate::repository::{
    AdminRecord, AnswerRecord, LevelRecord, LevelSummary, QuestionWithAnswers, UserRecord,
};

impl From<LevelRecord> for LevelOut {
    fn from(record: LevelRecord) -> Self {
        LevelOut {
            level_id: record.id.value(),
            level_name: record.name,
        }
    }
}

impl From<LevelSummary> for AdminLevelOut {
    fn from(summary: LevelSummary) -> Self {
        AdminLevelOut {
            level_id: summary.level.id.value(),
            level_name: summary.level.name,
            questions_count: summary.questions_count,
        }
    }
}

impl From<AnswerRecord> for AnswerOut {
    fn from(record: AnswerRecord) -> Self {
        AnswerOut {
            answer_id: record.id.value(),
            question_id: record.question_id.value(),
            answer: record.text,
            is_good: record.flag.code(),
        }
    }
}

impl From<QuestionWithAnswers> for QuestionOut {
    fn from(value: QuestionWithAnswers) -> Self {
        QuestionOut {
            question_id: value.question.id.value(),
            level_id: value.question.level_id.value(),
            question: value.question.text,
            answers: value.answers.into_iter().map(AnswerOut::from).collect(),
        }
    }
}

impl From<UserRecord> for UserOut {
    fn from(record: UserRecord) -> Self {
        UserOut {
            user_id: record.id.value(),
            login: record.login,
            progress: record.progress.value(),
        }
    }
}

impl From<AdminRecord> for AdminOut {
    fn from(record: AdminRecord) -> Self {
        AdminOut {
            id_admin: record.id.value(),
            login: record.login,
        }
    }
}

/// Converts every item of a list response.
pub(crate) fn all<T, U: From<T>>(items: Vec<T>) -> Vec<U> {
    items.into_iter().map(U::from).collect()
}
