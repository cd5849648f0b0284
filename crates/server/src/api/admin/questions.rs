use std::sync::Arc;

use axum::extract::State;
use fiszki_api_types::{DeletedResponse, QuestionCreate, QuestionOut, QuestionUpdate};
use fiszki_core::domain::{LevelId, QuestionId, QuestionText};
use tracing::info;

use crate::api::extract::{Json, Path};
use crate::api::{ApiError, AppState, convert};
use crate::repository::NewQuestion;

pub(super) async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<QuestionOut>>, ApiError> {
    let questions = state.questions.list_with_answers().await?;
    Ok(Json(convert::all(questions)))
}

pub(super) async fn get(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<i32>,
) -> Result<Json<QuestionOut>, ApiError> {
    let question = state
        .questions
        .find_with_answers(QuestionId::new(question_id))
        .await?
        .ok_or_else(|| ApiError::not_found("Question"))?;

    Ok(Json(question.into()))
}

pub(super) async fn create(
    State(state): State<Arc<AppState>>,
    Json(data): Json<QuestionCreate>,
) -> Result<Json<QuestionOut>, ApiError> {
    let new_question = NewQuestion {
        level_id: LevelId::new(data.level_id),
        text: QuestionText::new(data.question)?,
    };

    let question = state.questions.create(new_question).await?;

    info!(
        question_id = %question.question.id,
        level_id = %question.question.level_id,
        "question created"
    );
    Ok(Json(question.into()))
}

pub(super) async fn update(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<i32>,
    Json(data): Json<QuestionUpdate>,
) -> Result<Json<QuestionOut>, ApiError> {
    let text = QuestionText::new(data.question)?;
    let question = state
        .questions
        .update_text(QuestionId::new(question_id), text)
        .await?
        .ok_or_else(|| ApiError::not_found("Question"))?;

    Ok(Json(question.into()))
}

/// Deletes the question along with its answers.
pub(super) async fn delete(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<i32>,
) -> Result<Json<DeletedResponse>, ApiError> {
    if !state.questions.delete(QuestionId::new(question_id)).await? {
        return Err(ApiError::not_found("Question"));
    }

    info!(question_id, "question deleted");
    Ok(Json(DeletedResponse::new("Question")))
}
