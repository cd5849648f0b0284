use std::sync::Arc;

use axum::extract::State;
use fiszki_api_types::{AdminLevelOut, DeletedResponse, LevelCreate, LevelOut, LevelUpdate};
use fiszki_core::domain::{LevelId, LevelName};
use tracing::info;

use crate::api::extract::{Json, Path};
use crate::api::{ApiError, AppState, convert};

/// Levels with the number of questions each holds.
pub(super) async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AdminLevelOut>>, ApiError> {
    let summaries = state.levels.list_with_question_counts().await?;
    Ok(Json(convert::all(summaries)))
}

pub(super) async fn get(
    State(state): State<Arc<AppState>>,
    Path(level_id): Path<i32>,
) -> Result<Json<LevelOut>, ApiError> {
    let level = state
        .levels
        .find_by_id(LevelId::new(level_id))
        .await?
        .ok_or_else(|| ApiError::not_found("Level"))?;

    Ok(Json(level.into()))
}

pub(super) async fn create(
    State(state): State<Arc<AppState>>,
    Json(data): Json<LevelCreate>,
) -> Result<Json<LevelOut>, ApiError> {
    let level = state.levels.create(LevelName::new(data.level_name)?).await?;

    info!(level_id = %level.id, name = %level.name, "level created");
    Ok(Json(level.into()))
}

pub(super) async fn update(
    State(state): State<Arc<AppState>>,
    Path(level_id): Path<i32>,
    Json(data): Json<LevelUpdate>,
) -> Result<Json<LevelOut>, ApiError> {
    let name = LevelName::new(data.level_name)?;
    let level = state
        .levels
        .rename(LevelId::new(level_id), name)
        .await?
        .ok_or_else(|| ApiError::not_found("Level"))?;

    Ok(Json(level.into()))
}

/// Deletes the level along with its questions and their answers.
pub(super) async fn delete(
    State(state): State<Arc<AppState>>,
    Path(level_id): Path<i32>,
) -> Result<Json<DeletedResponse>, ApiError> {
    if !state.levels.delete(LevelId::new(level_id)).await? {
        return Err(ApiError::not_found("Level"));
    }

    info!(level_id, "level deleted");
    Ok(Json(DeletedResponse::new("Level")))
}
