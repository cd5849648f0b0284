//! End-user account endpoints.
//!
//! These are unauthenticated: after login the client identifies the user by
//! the returned `user_id`.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    routing::{get, post, put},
};
use fiszki_api_types::{
    ProgressQuery, UserChangeLoginIn, UserChangePasswordIn, UserCreate, UserLoginIn, UserOut,
    UserResetPasswordIn,
};
use fiszki_core::domain::{Login, Password, Progress, UserId};
use tracing::{info, warn};

use super::extract::{Json, Path, Query};
use super::{ApiError, AppState};
use crate::auth::{AuthError, reset_code_matches};
use crate::repository::{NewUser, UserChanges};

pub fn create_users_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/register", post(register_user))
        .route("/user/login", post(login_user))
        .route("/user/reset-password", post(reset_password))
        .route("/user/{user_id}", get(get_user))
        .route("/user/{user_id}/progress", put(update_progress))
        .route("/user/{user_id}/change-password", put(change_password))
        .route("/user/{user_id}/change-login", put(change_login))
}

async fn get_user(
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

async fn update_progress(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<UserOut>, ApiError> {
    let changes = UserChanges {
        progress: Some(Progress::new(query.new_progress)),
        ..Default::default()
    };

    update_user(&state, UserId::new(user_id), changes).await
}

async fn register_user(
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

    info!(user_id = %user.id, login = %user.login, "user registered");
    Ok(Json(user.into()))
}

async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(data): Json<UserLoginIn>,
) -> Result<Json<UserOut>, ApiError> {
    let Some(user) = state.users.find_by_login(&data.login).await? else {
        return Err(AuthError::InvalidCredentials.into());
    };

    if !state
        .passwords
        .verify(&data.password, &user.stored_password)
        .await?
    {
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(Json(user.into()))
}

async fn change_password(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Json(data): Json<UserChangePasswordIn>,
) -> Result<Json<UserOut>, ApiError> {
    let password = Password::new(data.new_password)?;
    let changes = UserChanges {
        stored_password: Some(state.passwords.hash(&password).await?),
        ..Default::default()
    };

    update_user(&state, UserId::new(user_id), changes).await
}

async fn change_login(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Json(data): Json<UserChangeLoginIn>,
) -> Result<Json<UserOut>, ApiError> {
    let changes = UserChanges {
        login: Some(Login::new(data.new_login)?),
        ..Default::default()
    };

    update_user(&state, UserId::new(user_id), changes).await
}

async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(data): Json<UserResetPasswordIn>,
) -> Result<Json<UserOut>, ApiError> {
    // Checked before the lookup so a wrong code says nothing about the login.
    if !reset_code_matches(&state.reset_code, &data.code) {
        warn!("password reset attempted with wrong code");
        return Err(ApiError::bad_request(
            "INVALID_RESET_CODE",
            "Invalid reset code",
        ));
    }

    let password = Password::new(data.new_password)?;
    let user = state
        .users
        .find_by_login(&data.login)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    let changes = UserChanges {
        stored_password: Some(state.passwords.hash(&password).await?),
        ..Default::default()
    };
    let user = update_user(&state, user.id, changes).await?;

    info!(user_id = user.0.user_id, "user password reset");
    Ok(user)
}

/// Applies `changes` and maps a missing row to 404.
pub(super) async fn update_user(
    state: &AppState,
    user_id: UserId,
    changes: UserChanges,
) -> Result<Json<UserOut>, ApiError> {
    let user = state
        .users
        .update(user_id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))?;

    Ok(Json(user.into()))
}
