//! Error type returned by every handler.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use fiszki_api_types::ErrorResponse;
use fiszki_core::domain::DomainError;
use tracing::error;

use crate::auth::AuthError;
use crate::repository::RepositoryError;

#[derive(Debug)]
pub struct ApiError {
    message: String,
    code: &'static str,
    status: StatusCode,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            status,
        }
    }

    /// 404 for a missing `entity` ("Level", "User", ...).
    pub fn not_found(entity: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", format!("{entity} not found"))
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::bad_request("INVALID_INPUT", err.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(message) => ApiError::bad_request("CONFLICT", message),
            RepositoryError::ParentNotFound(entity) => ApiError::not_found(entity),
            RepositoryError::CorruptRow(e) => {
                error!(error = %e, "corrupt row in database");
                ApiError::internal()
            }
            RepositoryError::Db(e) => {
                error!(error = %e, "database error");
                ApiError::internal()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            e if e.is_unauthorized() => ApiError::unauthorized("Could not validate credentials"),
            e => {
                error!(error = %e, "authentication backend failure");
                ApiError::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = Json(ErrorResponse {
            code: self.code.to_string(),
            message: self.message,
        });
        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
