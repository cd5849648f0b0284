use crate::entity::{answer, level, question};
use async_trait::async_trait;
use fiszki_core::domain::{LevelId, QuestionId, QuestionText};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Select, TransactionTrait,
};

use super::answer_repository::{AnswerRecord, SeaOrmAnswerRepository};
use super::{RepositoryError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub level_id: LevelId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionWithAnswers {
    pub question: QuestionRecord,
    pub answers: Vec<AnswerRecord>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub level_id: LevelId,
    pub text: QuestionText,
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn list_with_answers(&self) -> Result<Vec<QuestionWithAnswers>>;
    async fn list_by_level_with_answers(&self, level_id: LevelId)
    -> Result<Vec<QuestionWithAnswers>>;
    async fn find_with_answers(&self, question_id: QuestionId)
    -> Result<Option<QuestionWithAnswers>>;
    /// Fails with `ParentNotFound` when the level does not exist.
    async fn create(&self, new_question: NewQuestion) -> Result<QuestionWithAnswers>;
    async fn update_text(
        &self,
        question_id: QuestionId,
        text: QuestionText,
    ) -> Result<Option<QuestionWithAnswers>>;
    /// Removes the question together with its answers.
    async fn delete(&self, question_id: QuestionId) -> Result<bool>;
}

#[derive(Clone)]
pub struct SeaOrmQuestionRepository {
    db: DatabaseConnection,
}

impl SeaOrmQuestionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: question::Model) -> QuestionRecord {
        QuestionRecord {
            id: QuestionId::new(model.question_id),
            level_id: LevelId::new(model.level_id),
            text: model.question,
        }
    }

    fn map_with_answers(
        model: question::Model,
        answers: Vec<answer::Model>,
    ) -> Result<QuestionWithAnswers> {
        let mut answers = answers
            .into_iter()
            .map(SeaOrmAnswerRepository::map_model)
            .collect::<Result<Vec<_>>>()?;
        answers.sort_by_key(|answer| answer.id);

        Ok(QuestionWithAnswers {
            question: Self::map_model(model),
            answers,
        })
    }

    async fn load_with_answers(
        &self,
        query: Select<question::Entity>,
    ) -> Result<Vec<QuestionWithAnswers>> {
        let rows = query
            .order_by_asc(question::Column::QuestionId)
            .find_with_related(answer::Entity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(model, answers)| Self::map_with_answers(model, answers))
            .collect()
    }
}

#[async_trait]
impl QuestionRepository for SeaOrmQuestionRepository {
    async fn list_with_answers(&self) -> Result<Vec<QuestionWithAnswers>> {
        self.load_with_answers(question::Entity::find()).await
    }

    async fn list_by_level_with_answers(
        &self,
        level_id: LevelId,
    ) -> Result<Vec<QuestionWithAnswers>> {
        self.load_with_answers(
            question::Entity::find().filter(question::Column::LevelId.eq(level_id.value())),
        )
        .await
    }

    async fn find_with_answers(
        &self,
        question_id: QuestionId,
    ) -> Result<Option<QuestionWithAnswers>> {
        let mut rows = self
            .load_with_answers(question::Entity::find_by_id(question_id.value()))
            .await?;

        Ok(rows.pop())
    }

    async fn create(&self, new_question: NewQuestion) -> Result<QuestionWithAnswers> {
        if level::Entity::find_by_id(new_question.level_id.value())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(RepositoryError::ParentNotFound("Level"));
        }

        let active_model = question::ActiveModel {
            level_id: Set(new_question.level_id.value()),
            question: Set(new_question.text.into_inner()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(QuestionWithAnswers {
            question: Self::map_model(model),
            answers: Vec::new(),
        })
    }

    async fn update_text(
        &self,
        question_id: QuestionId,
        text: QuestionText,
    ) -> Result<Option<QuestionWithAnswers>> {
        let Some(model) = question::Entity::find_by_id(question_id.value())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: question::ActiveModel = model.into();
        active_model.question = Set(text.into_inner());
        active_model.update(&self.db).await?;

        self.find_with_answers(question_id).await
    }

    async fn delete(&self, question_id: QuestionId) -> Result<bool> {
        let txn = self.db.begin().await?;

        let result = question::Entity::find_by_id(question_id.value())
            .one(&txn)
            .await?;
        if result.is_none() {
            return Ok(false);
        }

        answer::Entity::delete_many()
            .filter(answer::Column::QuestionId.eq(question_id.value()))
            .exec(&txn)
            .await?;
        question::Entity::delete_by_id(question_id.value())
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(true)
    }
}
