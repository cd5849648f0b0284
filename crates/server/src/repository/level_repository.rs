use crate::entity::{answer, level, question};
use async_trait::async_trait;
use fiszki_core::domain::{LevelId, LevelName};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, QueryTrait, RelationTrait,
    TransactionTrait, sea_query::Expr,
};

use super::{RepositoryError, Result, conflict_on_unique};

const DUPLICATE_LEVEL: &str = "Level already exists";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRecord {
    pub id: LevelId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSummary {
    pub level: LevelRecord,
    pub questions_count: u64,
}

#[async_trait]
pub trait LevelRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<LevelRecord>>;
    async fn list_with_question_counts(&self) -> Result<Vec<LevelSummary>>;
    async fn find_by_id(&self, level_id: LevelId) -> Result<Option<LevelRecord>>;
    async fn create(&self, name: LevelName) -> Result<LevelRecord>;
    async fn rename(&self, level_id: LevelId, name: LevelName) -> Result<Option<LevelRecord>>;
    /// Removes the level together with its questions and their answers.
    /// Returns `false` when no such level exists.
    async fn delete(&self, level_id: LevelId) -> Result<bool>;
}

#[derive(Clone)]
pub struct SeaOrmLevelRepository {
    db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct LevelCountRow {
    level_id: i32,
    level_name: String,
    questions_count: i64,
}

impl SeaOrmLevelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: level::Model) -> LevelRecord {
        LevelRecord {
            id: LevelId::new(model.level_id),
            name: model.level_name,
        }
    }

    async fn name_taken(&self, name: &LevelName, except: Option<LevelId>) -> Result<bool> {
        let mut query = level::Entity::find().filter(level::Column::LevelName.eq(name.as_str()));
        if let Some(level_id) = except {
            query = query.filter(level::Column::LevelId.ne(level_id.value()));
        }

        Ok(query.one(&self.db).await?.is_some())
    }
}

#[async_trait]
impl LevelRepository for SeaOrmLevelRepository {
    async fn list(&self) -> Result<Vec<LevelRecord>> {
        let models = level::Entity::find()
            .order_by_asc(level::Column::LevelId)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::map_model).collect())
    }

    async fn list_with_question_counts(&self) -> Result<Vec<LevelSummary>> {
        let rows = level::Entity::find()
            .select_only()
            .column(level::Column::LevelId)
            .column(level::Column::LevelName)
            .column_as(
                Expr::col((question::Entity, question::Column::QuestionId)).count(),
                "questions_count",
            )
            .join(JoinType::LeftJoin, level::Relation::Question.def())
            .group_by(level::Column::LevelId)
            .group_by(level::Column::LevelName)
            .order_by_asc(level::Column::LevelId)
            .into_model::<LevelCountRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| LevelSummary {
                level: LevelRecord {
                    id: LevelId::new(row.level_id),
                    name: row.level_name,
                },
                questions_count: u64::try_from(row.questions_count).unwrap_or_default(),
            })
            .collect())
    }

    async fn find_by_id(&self, level_id: LevelId) -> Result<Option<LevelRecord>> {
        let model = level::Entity::find_by_id(level_id.value())
            .one(&self.db)
            .await?;

        Ok(model.map(Self::map_model))
    }

    async fn create(&self, name: LevelName) -> Result<LevelRecord> {
        if self.name_taken(&name, None).await? {
            return Err(RepositoryError::Conflict(DUPLICATE_LEVEL));
        }

        let active_model = level::ActiveModel {
            level_name: Set(name.into_inner()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(conflict_on_unique(DUPLICATE_LEVEL))?;
        Ok(Self::map_model(model))
    }

    async fn rename(&self, level_id: LevelId, name: LevelName) -> Result<Option<LevelRecord>> {
        let Some(model) = level::Entity::find_by_id(level_id.value())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        if self.name_taken(&name, Some(level_id)).await? {
            return Err(RepositoryError::Conflict(DUPLICATE_LEVEL));
        }

        let mut active_model: level::ActiveModel = model.into();
        active_model.level_name = Set(name.into_inner());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(conflict_on_unique(DUPLICATE_LEVEL))?;
        Ok(Some(Self::map_model(updated)))
    }

    async fn delete(&self, level_id: LevelId) -> Result<bool> {
        let txn = self.db.begin().await?;

        if level::Entity::find_by_id(level_id.value())
            .one(&txn)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        let level_questions = question::Entity::find()
            .select_only()
            .column(question::Column::QuestionId)
            .filter(question::Column::LevelId.eq(level_id.value()))
            .into_query();

        // Cascade explicitly so the outcome does not depend on the backend
        // enforcing foreign keys (SQLite needs a pragma for that).
        answer::Entity::delete_many()
            .filter(answer::Column::QuestionId.in_subquery(level_questions))
            .exec(&txn)
            .await?;
        question::Entity::delete_many()
            .filter(question::Column::LevelId.eq(level_id.value()))
            .exec(&txn)
            .await?;
        level::Entity::delete_by_id(level_id.value())
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(true)
    }
}
