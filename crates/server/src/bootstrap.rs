use anyhow::Context;
use fiszki_core::domain::{Login, Password};
use tracing::info;

use crate::api::AppState;
use crate::config::DefaultAdmin;
use crate::repository::NewAdmin;

/// Creates the configured administrator unless an account with that login
/// already exists. Returns whether one was created.
pub async fn ensure_default_admin(state: &AppState, default_admin: &DefaultAdmin) -> anyhow::Result<bool> {
    if state
        .admins
        .find_by_login(&default_admin.login)
        .await
        .context("failed to look up default admin")?
        .is_some()
    {
        return Ok(false);
    }

    let login = Login::new(default_admin.login.clone())?;
    let password = Password::new(default_admin.password.clone())?;
    let stored_password = state
        .passwords
        .hash(&password)
        .await
        .context("failed to hash default admin password")?;

    let admin = state
        .admins
        .create(NewAdmin {
            login,
            stored_password,
        })
        .await
        .context("failed to create default admin")?;

    info!(admin_id = %admin.id, login = %admin.login, "default admin created");
    Ok(true)
}
