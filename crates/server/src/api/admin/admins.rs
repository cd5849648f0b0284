use std::sync::Arc;

use axum::{Extension, extract::State};
use fiszki_api_types::{AdminCreate, AdminOut, AdminUpdate, DeletedResponse};
use fiszki_core::domain::{AdminId, Login, Password};
use tracing::info;

use crate::api::extract::{Json, Path};
use crate::api::{ApiError, AppState, convert};
use crate::auth::AuthenticatedAdmin;
use crate::repository::{AdminChanges, NewAdmin};

pub(super) async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AdminOut>>, ApiError> {
    let admins = state.admins.list().await?;
    Ok(Json(convert::all(admins)))
}

pub(super) async fn get(
    State(state): State<Arc<AppState>>,
    Path(admin_id): Path<i32>,
) -> Result<Json<AdminOut>, ApiError> {
    let admin = state
        .admins
        .find_by_id(AdminId::new(admin_id))
        .await?
        .ok_or_else(|| ApiError::not_found("Admin"))?;

    Ok(Json(admin.into()))
}

pub(super) async fn create(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<AuthenticatedAdmin>,
    Json(data): Json<AdminCreate>,
) -> Result<Json<AdminOut>, ApiError> {
    let login = Login::new(data.login)?;
    let password = Password::new(data.password)?;

    let admin = state
        .admins
        .create(NewAdmin {
            login,
            stored_password: state.passwords.hash(&password).await?,
        })
        .await?;

    info!(admin_id = %admin.id, created_by = %current.login, "admin created");
    Ok(Json(admin.into()))
}

pub(super) async fn update(
    State(state): State<Arc<AppState>>,
    Path(admin_id): Path<i32>,
    Json(data): Json<AdminUpdate>,
) -> Result<Json<AdminOut>, ApiError> {
    let login = data.login.map(Login::new).transpose()?;
    let stored_password = match data.password {
        Some(password) => Some(state.passwords.hash(&Password::new(password)?).await?),
        None => None,
    };

    let admin = state
        .admins
        .update(
            AdminId::new(admin_id),
            AdminChanges {
                login,
                stored_password,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Admin"))?;

    Ok(Json(admin.into()))
}

/// An administrator cannot delete the account they are signed in with.
pub(super) async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<AuthenticatedAdmin>,
    Path(admin_id): Path<i32>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let admin_id = AdminId::new(admin_id);
    if admin_id == current.id {
        return Err(ApiError::bad_request(
            "SELF_DELETE",
            "Cannot delete the signed-in admin",
        ));
    }

    if !state.admins.delete(admin_id).await? {
        return Err(ApiError::not_found("Admin"));
    }

    info!(admin_id = %admin_id, deleted_by = %current.login, "admin deleted");
    Ok(Json(DeletedResponse::new("Admin")))
}
