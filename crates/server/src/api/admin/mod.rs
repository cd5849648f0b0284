//! Administrator panel API. Everything except `/admin/login` sits behind
//! [`require_admin`].

mod admins;
mod answers;
mod levels;
mod login;
mod questions;
mod users;

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::AppState;
use crate::auth::require_admin;

pub fn create_admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        // levels
        .route("/admin/levels", get(levels::list).post(levels::create))
        .route(
            "/admin/levels/{level_id}",
            get(levels::get).put(levels::update).delete(levels::delete),
        )
        // questions
        .route(
            "/admin/questions",
            get(questions::list).post(questions::create),
        )
        .route(
            "/admin/questions/{question_id}",
            get(questions::get)
                .put(questions::update)
                .delete(questions::delete),
        )
        // answers
        .route("/admin/answers", get(answers::list).post(answers::create))
        .route(
            "/admin/answers/{answer_id}",
            get(answers::get).put(answers::update).delete(answers::delete),
        )
        // users
        .route("/admin/users", get(users::list).post(users::create))
        .route(
            "/admin/users/{user_id}",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route(
            "/admin/users/{user_id}/reset-progress",
            put(users::reset_progress),
        )
        // administrators
        .route("/admin/admins", get(admins::list).post(admins::create))
        .route(
            "/admin/admins/{admin_id}",
            get(admins::get).put(admins::update).delete(admins::delete),
        )
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/admin/login", post(login::login))
        .merge(protected)
}
