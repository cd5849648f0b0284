use crate::entity::{answer, question};
use async_trait::async_trait;
use fiszki_core::domain::{AnswerFlag, AnswerId, AnswerText, QuestionId};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder,
};

use super::{RepositoryError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub text: String,
    pub flag: AnswerFlag,
}

#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub question_id: QuestionId,
    pub text: AnswerText,
    pub flag: AnswerFlag,
}

#[async_trait]
pub trait AnswerRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<AnswerRecord>>;
    async fn find_by_id(&self, answer_id: AnswerId) -> Result<Option<AnswerRecord>>;
    /// Fails with `ParentNotFound` when the question does not exist.
    async fn create(&self, new_answer: NewAnswer) -> Result<AnswerRecord>;
    async fn update(
        &self,
        answer_id: AnswerId,
        text: AnswerText,
        flag: AnswerFlag,
    ) -> Result<Option<AnswerRecord>>;
    async fn delete(&self, answer_id: AnswerId) -> Result<bool>;
}

#[derive(Clone)]
pub struct SeaOrmAnswerRepository {
    db: DatabaseConnection,
}

impl SeaOrmAnswerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub(super) fn map_model(model: answer::Model) -> Result<AnswerRecord> {
        Ok(AnswerRecord {
            id: AnswerId::new(model.answer_id),
            question_id: QuestionId::new(model.question_id),
            text: model.answer,
            flag: AnswerFlag::try_from(model.is_good)?,
        })
    }
}

#[async_trait]
impl AnswerRepository for SeaOrmAnswerRepository {
    async fn list(&self) -> Result<Vec<AnswerRecord>> {
        let models = answer::Entity::find()
            .order_by_asc(answer::Column::AnswerId)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }

    async fn find_by_id(&self, answer_id: AnswerId) -> Result<Option<AnswerRecord>> {
        let model = answer::Entity::find_by_id(answer_id.value())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn create(&self, new_answer: NewAnswer) -> Result<AnswerRecord> {
        if question::Entity::find_by_id(new_answer.question_id.value())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(RepositoryError::ParentNotFound("Question"));
        }

        let active_model = answer::ActiveModel {
            question_id: Set(new_answer.question_id.value()),
            answer: Set(new_answer.text.into_inner()),
            is_good: Set(new_answer.flag.code()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn update(
        &self,
        answer_id: AnswerId,
        text: AnswerText,
        flag: AnswerFlag,
    ) -> Result<Option<AnswerRecord>> {
        let Some(model) = answer::Entity::find_by_id(answer_id.value())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: answer::ActiveModel = model.into();
        active_model.answer = Set(text.into_inner());
        active_model.is_good = Set(flag.code());

        let updated = active_model.update(&self.db).await?;
        Self::map_model(updated).map(Some)
    }

    async fn delete(&self, answer_id: AnswerId) -> Result<bool> {
        let result = answer::Entity::delete_by_id(answer_id.value())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
