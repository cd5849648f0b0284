mod common;

use axum::http::StatusCode;
use common::{RESET_CODE, setup_app, setup_app_with_scheme};
use fiszki_server::config::PasswordScheme;
use serde_json::json;

#[tokio::test]
async fn test_register_and_login() {
    let app = setup_app().await;

    let (status, user) = app
        .json("POST", "/user/register", json!({"login": "ola", "password": "tajne"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["login"], "ola");
    assert_eq!(user["progress"], 0);
    assert!(user.get("password").is_none());

    let (status, logged_in) = app
        .json("POST", "/user/login", json!({"login": "ola", "password": "tajne"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["user_id"], user["user_id"]);

    let (status, body) = app
        .json("POST", "/user/login", json!({"login": "ola", "password": "wrong"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, _) = app
        .json("POST", "/user/login", json!({"login": "nobody", "password": "tajne"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_duplicate_login_rejected() {
    let app = setup_app().await;
    app.json("POST", "/user/register", json!({"login": "ola", "password": "a"}))
        .await;

    let (status, body) = app
        .json("POST", "/user/register", json!({"login": "ola", "password": "b"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");

    let users = app.state.users.list().await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_password_stored_as_bcrypt_hash() {
    let app = setup_app().await;
    app.json("POST", "/user/register", json!({"login": "ola", "password": "tajne"}))
        .await;

    let user = app.state.users.find_by_login("ola").await.unwrap().unwrap();
    assert_ne!(user.stored_password, "tajne");
    assert!(user.stored_password.starts_with("$2"));
}

#[tokio::test]
async fn test_plain_scheme_stores_and_checks_plaintext() {
    let app = setup_app_with_scheme(PasswordScheme::Plain).await;
    app.json("POST", "/user/register", json!({"login": "ola", "password": "tajne"}))
        .await;

    let user = app.state.users.find_by_login("ola").await.unwrap().unwrap();
    assert_eq!(user.stored_password, "tajne");

    let (status, _) = app
        .json("POST", "/user/login", json!({"login": "ola", "password": "tajne"}))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_get_user_and_progress() {
    let app = setup_app().await;
    let (_, user) = app
        .json("POST", "/user/register", json!({"login": "ola", "password": "a"}))
        .await;
    let user_id = user["user_id"].as_i64().unwrap();

    let (status, body) = app
        .send(common::request(
            "PUT",
            &format!("/user/{user_id}/progress?new_progress=7"),
            None,
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], 7);

    let (status, body) = app.get(&format!("/user/{user_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"user_id": user_id, "login": "ola", "progress": 7}));

    let (status, body) = app
        .send(common::request(
            "PUT",
            &format!("/user/{user_id}/progress?new_progress=-1"),
            None,
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], -1);

    let (_, body) = app.get(&format!("/user/{user_id}")).await;
    assert_eq!(body["progress"], -1);

    let (status, body) = app.get("/user/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, _) = app
        .send(common::request("PUT", "/user/999/progress?new_progress=1", None, None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_change_password() {
    let app = setup_app().await;
    let (_, user) = app
        .json("POST", "/user/register", json!({"login": "ola", "password": "old"}))
        .await;

    let (status, _) = app
        .json(
            "PUT",
            &format!("/user/{}/change-password", user["user_id"]),
            json!({"new_password": "new"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .json("POST", "/user/login", json!({"login": "ola", "password": "old"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app
        .json("POST", "/user/login", json!({"login": "ola", "password": "new"}))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_change_login_conflict() {
    let app = setup_app().await;
    let (_, ola) = app
        .json("POST", "/user/register", json!({"login": "ola", "password": "a"}))
        .await;
    app.json("POST", "/user/register", json!({"login": "jan", "password": "b"}))
        .await;
    let uri = format!("/user/{}/change-login", ola["user_id"]);

    let (status, body) = app.json("PUT", &uri, json!({"new_login": "jan"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Login already taken");

    // Keeping one's own login is allowed.
    let (status, _) = app.json("PUT", &uri, json!({"new_login": "ola"})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.json("PUT", &uri, json!({"new_login": "aleksandra"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["login"], "aleksandra");
}

#[tokio::test]
async fn test_reset_password_with_wrong_code_rejected() {
    let app = setup_app().await;
    app.json("POST", "/user/register", json!({"login": "ola", "password": "old"}))
        .await;

    for login in ["ola", "nobody"] {
        let (status, body) = app
            .json(
                "POST",
                "/user/reset-password",
                json!({"login": login, "code": "0000", "new_password": "hacked"}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "login {login}");
        assert_eq!(body["message"], "Invalid reset code");
    }

    let (status, _) = app
        .json("POST", "/user/login", json!({"login": "ola", "password": "old"}))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_reset_password_with_shared_code() {
    let app = setup_app().await;
    app.json("POST", "/user/register", json!({"login": "ola", "password": "old"}))
        .await;

    let (status, _) = app
        .json(
            "POST",
            "/user/reset-password",
            json!({"login": "ola", "code": RESET_CODE, "new_password": "fresh"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .json("POST", "/user/login", json!({"login": "ola", "password": "fresh"}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .json(
            "POST",
            "/user/reset-password",
            json!({"login": "nobody", "code": RESET_CODE, "new_password": "fresh"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_manages_users() {
    let app = setup_app().await;
    let (status, user) = app
        .admin(
            "POST",
            "/admin/users",
            Some(json!({"login": "ola", "password": "a"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let user_uri = format!("/admin/users/{}", user["user_id"]);

    app.send(common::request(
        "PUT",
        &format!("/user/{}/progress?new_progress=12", user["user_id"]),
        None,
        None,
    ))
    .await;

    let (status, body) = app
        .admin("PUT", &format!("{user_uri}/reset-progress"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], 0);

    let (status, body) = app
        .admin("PUT", &user_uri, Some(json!({"password": "b"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["login"], "ola");
    let (status, _) = app
        .json("POST", "/user/login", json!({"login": "ola", "password": "b"}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, users) = app.admin("GET", "/admin/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().map(Vec::len), Some(1));

    let (status, body) = app.admin("DELETE", &user_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"detail": "User deleted"}));

    let (status, _) = app.admin("GET", &user_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
