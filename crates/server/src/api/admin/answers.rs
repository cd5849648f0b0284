use std::sync::Arc;

use axum::extract::State;
use fiszki_api_types::{AnswerCreate, AnswerOut, AnswerUpdate, DeletedResponse};
use fiszki_core::domain::{AnswerFlag, AnswerId, AnswerText, QuestionId};
use tracing::info;

use crate::api::extract::{Json, Path};
use crate::api::{ApiError, AppState, convert};
use crate::repository::NewAnswer;

pub(super) async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AnswerOut>>, ApiError> {
    let answers = state.answers.list().await?;
    Ok(Json(convert::all(answers)))
}

pub(super) async fn get(
    State(state): State<Arc<AppState>>,
    Path(answer_id): Path<i32>,
) -> Result<Json<AnswerOut>, ApiError> {
    let answer = state
        .answers
        .find_by_id(AnswerId::new(answer_id))
        .await?
        .ok_or_else(|| ApiError::not_found("Answer"))?;

    Ok(Json(answer.into()))
}

pub(super) async fn create(
    State(state): State<Arc<AppState>>,
    Json(data): Json<AnswerCreate>,
) -> Result<Json<AnswerOut>, ApiError> {
    let new_answer = NewAnswer {
        question_id: QuestionId::new(data.question_id),
        text: AnswerText::new(data.answer)?,
        flag: AnswerFlag::try_from(data.is_good)?,
    };

    let answer = state.answers.create(new_answer).await?;

    info!(
        answer_id = %answer.id,
        question_id = %answer.question_id,
        correct = answer.flag.is_correct(),
        "answer created"
    );
    Ok(Json(answer.into()))
}

pub(super) async fn update(
    State(state): State<Arc<AppState>>,
    Path(answer_id): Path<i32>,
    Json(data): Json<AnswerUpdate>,
) -> Result<Json<AnswerOut>, ApiError> {
    let text = AnswerText::new(data.answer)?;
    let flag = AnswerFlag::try_from(data.is_good)?;
    let answer = state
        .answers
        .update(AnswerId::new(answer_id), text, flag)
        .await?
        .ok_or_else(|| ApiError::not_found("Answer"))?;

    Ok(Json(answer.into()))
}

pub(super) async fn delete(
    State(state): State<Arc<AppState>>,
    Path(answer_id): Path<i32>,
) -> Result<Json<DeletedResponse>, ApiError> {
    if !state.answers.delete(AnswerId::new(answer_id)).await? {
        return Err(ApiError::not_found("Answer"));
    }

    info!(answer_id, "answer deleted");
    Ok(Json(DeletedResponse::new("Answer")))
}
