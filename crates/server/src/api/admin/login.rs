use std::sync::Arc;

use axum::extract::State;
use fiszki_api_types::{AdminLoginForm, TokenResponse};
use tracing::{info, warn};

use crate::api::extract::{Form, Json};
use crate::api::{ApiError, AppState};

const INVALID_ADMIN_CREDENTIALS: &str = "Invalid admin credentials";

/// OAuth2 password grant: form `username` + `password` in, bearer token out.
pub(super) async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AdminLoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Some(admin) = state.admins.find_by_login(&form.username).await? else {
        warn!(login = %form.username, "admin login for unknown account");
        return Err(ApiError::unauthorized(INVALID_ADMIN_CREDENTIALS));
    };

    if !state
        .passwords
        .verify(&form.password, &admin.stored_password)
        .await?
    {
        warn!(admin_id = %admin.id, "admin login with wrong password");
        return Err(ApiError::unauthorized(INVALID_ADMIN_CREDENTIALS));
    }

    let token = state.tokens.issue(admin.id)?;
    info!(
        admin_id = %admin.id,
        expires_in_minutes = state.tokens.lifetime().num_minutes(),
        "admin token issued"
    );
    Ok(Json(TokenResponse::bearer(token)))
}
