//! HTTP routes.

mod admin;
mod convert;
mod error;
mod extract;
mod health;
mod levels;
pub mod state;
mod users;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub use admin::create_admin_router;
pub use error::ApiError;
pub use levels::create_levels_router;
pub use state::AppState;
pub use users::create_users_router;

/// Assembles every route over `state`.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .merge(create_levels_router())
        .merge(create_users_router())
        .merge(create_admin_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
