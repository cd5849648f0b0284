use crate::entity::admin;
use async_trait::async_trait;
use fiszki_core::domain::{AdminId, Login};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use super::{RepositoryError, Result, conflict_on_unique};

const DUPLICATE_ADMIN: &str = "Admin already exists";
const LOGIN_TAKEN: &str = "Login already taken";

#[derive(Debug, Clone)]
pub struct AdminRecord {
    pub id: AdminId,
    pub login: String,
    pub stored_password: String,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub login: Login,
    pub stored_password: String,
}

#[derive(Debug, Clone, Default)]
pub struct AdminChanges {
    pub login: Option<Login>,
    pub stored_password: Option<String>,
}

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<AdminRecord>>;
    async fn create(&self, new_admin: NewAdmin) -> Result<AdminRecord>;
    async fn find_by_id(&self, admin_id: AdminId) -> Result<Option<AdminRecord>>;
    async fn find_by_login(&self, login: &str) -> Result<Option<AdminRecord>>;
    async fn update(&self, admin_id: AdminId, changes: AdminChanges)
    -> Result<Option<AdminRecord>>;
    async fn delete(&self, admin_id: AdminId) -> Result<bool>;
}

#[derive(Clone)]
pub struct SeaOrmAdminRepository {
    db: DatabaseConnection,
}

impl SeaOrmAdminRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: admin::Model) -> AdminRecord {
        AdminRecord {
            id: AdminId::new(model.id_admin),
            login: model.login,
            stored_password: model.password,
        }
    }

    async fn find_model_by_login(&self, login: &str) -> Result<Option<admin::Model>> {
        Ok(admin::Entity::find()
            .filter(admin::Column::Login.eq(login))
            .one(&self.db)
            .await?)
    }
}

#[async_trait]
impl AdminRepository for SeaOrmAdminRepository {
    async fn list(&self) -> Result<Vec<AdminRecord>> {
        let models = admin::Entity::find()
            .order_by_asc(admin::Column::IdAdmin)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::map_model).collect())
    }

    async fn create(&self, new_admin: NewAdmin) -> Result<AdminRecord> {
        if self
            .find_model_by_login(new_admin.login.as_str())
            .await?
            .is_some()
        {
            return Err(RepositoryError::Conflict(DUPLICATE_ADMIN));
        }

        let active_model = admin::ActiveModel {
            login: Set(new_admin.login.into_inner()),
            password: Set(new_admin.stored_password),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(conflict_on_unique(DUPLICATE_ADMIN))?;
        Ok(Self::map_model(model))
    }

    async fn find_by_id(&self, admin_id: AdminId) -> Result<Option<AdminRecord>> {
        let model = admin::Entity::find_by_id(admin_id.value())
            .one(&self.db)
            .await?;

        Ok(model.map(Self::map_model))
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<AdminRecord>> {
        Ok(self.find_model_by_login(login).await?.map(Self::map_model))
    }

    async fn update(
        &self,
        admin_id: AdminId,
        changes: AdminChanges,
    ) -> Result<Option<AdminRecord>> {
        let Some(model) = admin::Entity::find_by_id(admin_id.value())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        if let Some(login) = &changes.login {
            if let Some(existing) = self.find_model_by_login(login.as_str()).await? {
                if existing.id_admin != model.id_admin {
                    return Err(RepositoryError::Conflict(LOGIN_TAKEN));
                }
            }
        }

        let mut active_model: admin::ActiveModel = model.into();
        if let Some(login) = changes.login {
            active_model.login = Set(login.into_inner());
        }
        if let Some(stored_password) = changes.stored_password {
            active_model.password = Set(stored_password);
        }

        if !active_model.is_changed() {
            return self.find_by_id(admin_id).await;
        }

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(conflict_on_unique(LOGIN_TAKEN))?;
        Ok(Some(Self::map_model(updated)))
    }

    async fn delete(&self, admin_id: AdminId) -> Result<bool> {
        let result = admin::Entity::delete_by_id(admin_id.value())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
