use crate::entity::user;
use async_trait::async_trait;
use fiszki_core::domain::{Login, Progress, UserId};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use super::{RepositoryError, Result, conflict_on_unique};

const DUPLICATE_USER: &str = "User already exists";
const LOGIN_TAKEN: &str = "Login already taken";

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub login: String,
    /// bcrypt hash or plaintext, as stored.
    pub stored_password: String,
    pub progress: Progress,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: Login,
    pub stored_password: String,
}

/// Fields to overwrite; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub login: Option<Login>,
    pub stored_password: Option<String>,
    pub progress: Option<Progress>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<UserRecord>>;
    async fn create(&self, new_user: NewUser) -> Result<UserRecord>;
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>>;
    async fn find_by_login(&self, login: &str) -> Result<Option<UserRecord>>;
    /// Fails with `Conflict` when the new login belongs to another user.
    async fn update(&self, user_id: UserId, changes: UserChanges) -> Result<Option<UserRecord>>;
    async fn delete(&self, user_id: UserId) -> Result<bool>;
}

#[derive(Clone)]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: user::Model) -> UserRecord {
        UserRecord {
            id: UserId::new(model.user_id),
            login: model.login,
            stored_password: model.password,
            progress: Progress::new(model.progress),
        }
    }

    async fn find_model_by_login(&self, login: &str) -> Result<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Login.eq(login))
            .one(&self.db)
            .await?)
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn list(&self) -> Result<Vec<UserRecord>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::UserId)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::map_model).collect())
    }

    async fn create(&self, new_user: NewUser) -> Result<UserRecord> {
        if self
            .find_model_by_login(new_user.login.as_str())
            .await?
            .is_some()
        {
            return Err(RepositoryError::Conflict(DUPLICATE_USER));
        }

        let active_model = user::ActiveModel {
            login: Set(new_user.login.into_inner()),
            password: Set(new_user.stored_password),
            progress: Set(Progress::ZERO.value()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(conflict_on_unique(DUPLICATE_USER))?;
        Ok(Self::map_model(model))
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>> {
        let model = user::Entity::find_by_id(user_id.value())
            .one(&self.db)
            .await?;

        Ok(model.map(Self::map_model))
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<UserRecord>> {
        Ok(self.find_model_by_login(login).await?.map(Self::map_model))
    }

    async fn update(&self, user_id: UserId, changes: UserChanges) -> Result<Option<UserRecord>> {
        let Some(model) = user::Entity::find_by_id(user_id.value())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        if let Some(login) = &changes.login {
            if let Some(existing) = self.find_model_by_login(login.as_str()).await? {
                if existing.user_id != model.user_id {
                    return Err(RepositoryError::Conflict(LOGIN_TAKEN));
                }
            }
        }

        let mut active_model: user::ActiveModel = model.into();
        if let Some(login) = changes.login {
            active_model.login = Set(login.into_inner());
        }
        if let Some(stored_password) = changes.stored_password {
            active_model.password = Set(stored_password);
        }
        if let Some(progress) = changes.progress {
            active_model.progress = Set(progress.value());
        }

        // Nothing set means nothing to write; sea-orm rejects an empty UPDATE.
        if !active_model.is_changed() {
            return self.find_by_id(user_id).await;
        }

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(conflict_on_unique(LOGIN_TAKEN))?;
        Ok(Some(Self::map_model(updated)))
    }

    async fn delete(&self, user_id: UserId) -> Result<bool> {
        let result = user::Entity::delete_by_id(user_id.value())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
