use std::sync::Arc;

use axum::extract::State;
use fiszki_api_types::{DeletedResponse, UserCreate, UserOut, UserUpdate};
use fiszki_core::domain::{Login, Password, Progress, UserId};
use tracing::info;

use crate::api::extract::{Json, Path};
use crate::api::users::update_user;
use crate::api::{ApiError, AppState, convert};
use crate::repository::{NewUser, UserChanges};

pub(super) async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserOut>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(convert::all(users)))
}

pub(super) async fn get(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserOut>, ApiError> {
    let user = state
        .users
        .find_by_id(UserId::new(user_id))
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    Ok(Json(user.into()))
}

pub(super) async fn create(
    State(state): State<Arc<AppState>>,
    Json(data): Json<UserCreate>,
) -> Result<Json<UserOut>, ApiError> {
    let login = Login::new(data.login)?;
    let password = Password::new(data.password)?;

    let user = state
        .users
        .create(NewUser {
            login,
            stored_password: state.passwords.hash(&password).await?,
        })
        .await?;

    info!(user_id = %user.id, "user created by admin");
    Ok(Json(user.into()))
}

/// Overwrites login and/or password; absent fields are kept.
pub(super) async fn update(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Json(data): Json<UserUpdate>,
) -> Result<Json<UserOut>, ApiError> {
    let login = data.login.map(Login::new).transpose()?;
    let stored_password = match data.password {
        Some(password) => Some(state.passwords.hash(&Password::new(password)?).await?),
        None => None,
    };

    update_user(
        &state,
        UserId::new(user_id),
        UserChanges {
            login,
            stored_password,
            progress: None,
        },
    )
    .await
}

pub(super) async fn reset_progress(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserOut>, ApiError> {
    let changes = UserChanges {
        progress: Some(Progress::ZERO),
        ..Default::default()
    };

    update_user(&state, UserId::new(user_id), changes).await
}

pub(super) async fn delete(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<DeletedResponse>, ApiError> {
    if !state.users.delete(UserId::new(user_id)).await? {
        return Err(ApiError::not_found("User"));
    }

    info!(user_id, "user deleted");
    Ok(Json(DeletedResponse::new("User")))
}
