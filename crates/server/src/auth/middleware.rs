//! Bearer-token guard for the administrator routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use fiszki_core::domain::AdminId;
use tracing::debug;

use super::AuthError;
use crate::api::{ApiError, AppState};

/// The administrator a request was authenticated as. Inserted into request
/// extensions by [`require_admin`].
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub id: AdminId,
    pub login: String,
}

/// Requires `Authorization: Bearer <token>` carrying a valid admin token whose
/// subject still exists.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AuthError::MissingToken)?;

    let admin_id = state.tokens.verify(token).inspect_err(|err| {
        debug!(error = %err, "rejected admin token");
    })?;

    let admin = state
        .admins
        .find_by_id(admin_id)
        .await?
        .ok_or(AuthError::UnknownSubject)?;

    request.extensions_mut().insert(AuthenticatedAdmin {
        id: admin.id,
        login: admin.login,
    });

    Ok(next.run(request).await)
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
