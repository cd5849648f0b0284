#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Duration;
use fiszki_server::auth::PasswordHasher;
use fiszki_server::config::{AuthConfig, PasswordScheme};
use fiszki_server::{AppState, app, db};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret";
pub const RESET_CODE: &str = "2468";
pub const ADMIN_LOGIN: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-pass";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

pub fn auth_config(scheme: PasswordScheme) -> AuthConfig {
    AuthConfig {
        secret_key: SECRET.to_string(),
        token_lifetime: Duration::minutes(60),
        reset_code: RESET_CODE.to_string(),
        password_scheme: scheme,
    }
}

pub async fn setup_app() -> TestApp {
    setup_app_with_scheme(PasswordScheme::Bcrypt).await
}

/// Fresh in-memory database, migrated, with one administrator seeded.
pub async fn setup_app_with_scheme(scheme: PasswordScheme) -> TestApp {
    let db = db::init_pool_and_migrate("sqlite::memory:")
        .await
        .expect("in-memory database should initialize");

    let auth = auth_config(scheme);
    let state = Arc::new(AppState::with_password_hasher(
        db,
        &auth,
        PasswordHasher::with_cost(scheme, 4),
    ));

    let default_admin = fiszki_server::config::DefaultAdmin {
        login: ADMIN_LOGIN.to_string(),
        password: ADMIN_PASSWORD.to_string(),
    };
    fiszki_server::bootstrap::ensure_default_admin(&state, &default_admin)
        .await
        .expect("admin should be seeded");

    TestApp {
        router: app(state.clone()),
        state,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router should respond");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(request("GET", uri, None, None)).await
    }

    pub async fn json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(request(method, uri, Some(body), None)).await
    }

    pub async fn admin(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.admin_token().await;
        self.send(request(method, uri, body, Some(&token))).await
    }

    pub async fn admin_login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        let form = format!("username={username}&password={password}");
        let request = Request::builder()
            .uri("/admin/login")
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .expect("request should build");
        self.send(request).await
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self.admin_login(ADMIN_LOGIN, ADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
        body["access_token"]
            .as_str()
            .expect("token in response")
            .to_string()
    }

    /// Creates a level, question and answer through the admin API and returns
    /// their ids.
    pub async fn seed_flashcard(&self, level: &str, question: &str, answer: &str) -> (i64, i64, i64) {
        let (status, level) = self
            .admin("POST", "/admin/levels", Some(serde_json::json!({"level_name": level})))
            .await;
        assert_eq!(status, StatusCode::OK, "{level}");
        let level_id = level["level_id"].as_i64().expect("level_id");

        let (status, question) = self
            .admin(
                "POST",
                "/admin/questions",
                Some(serde_json::json!({"level_id": level_id, "question": question})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{question}");
        let question_id = question["question_id"].as_i64().expect("question_id");

        let (status, answer) = self
            .admin(
                "POST",
                "/admin/answers",
                Some(serde_json::json!({"question_id": question_id, "answer": answer, "is_good": 1})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{answer}");
        let answer_id = answer["answer_id"].as_i64().expect("answer_id");

        (level_id, question_id, answer_id)
    }
}

pub fn request(method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request should build")
}
