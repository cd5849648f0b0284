//! Public level browsing for the mobile client.

use std::sync::Arc;

use axum::{Router, extract::State, routing::get};
use fiszki_api_types::{LevelOut, QuestionOut};
use fiszki_core::domain::LevelId;

use super::extract::{Json, Path};
use super::{ApiError, AppState, convert};

pub fn create_levels_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/levels", get(list_levels))
        .route("/levels/{level_id}/questions", get(list_level_questions))
}

async fn list_levels(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LevelOut>>, ApiError> {
    let levels = state.levels.list().await?;
    Ok(Json(convert::all(levels)))
}

/// Questions of one level, each with its answers nested.
async fn list_level_questions(
    State(state): State<Arc<AppState>>,
    Path(level_id): Path<i32>,
) -> Result<Json<Vec<QuestionOut>>, ApiError> {
    let level_id = LevelId::new(level_id);
    if state.levels.find_by_id(level_id).await?.is_none() {
        return Err(ApiError::not_found("Level"));
    }

    let questions = state.questions.list_by_level_with_answers(level_id).await?;
    Ok(Json(convert::all(questions)))
}
