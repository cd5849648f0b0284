mod common;

use axum::http::StatusCode;
use common::setup_app;
use fiszki_core::domain::{AnswerFlag, AnswerText, LevelId, QuestionId, QuestionText};
use fiszki_server::repository::{NewAnswer, NewQuestion};
use serde_json::json;

#[tokio::test]
async fn test_level_questions_nest_answers() {
    let app = setup_app().await;
    let (level_id, question_id, answer_id) = app.seed_flashcard("colors", "red", "czerwony").await;

    let (status, levels) = app.get("/levels").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(levels, json!([{"level_id": level_id, "level_name": "colors"}]));

    let (status, questions) = app.get(&format!("/levels/{level_id}/questions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        questions,
        json!([{
            "question_id": question_id,
            "level_id": level_id,
            "question": "red",
            "answers": [{
                "answer_id": answer_id,
                "question_id": question_id,
                "answer": "czerwony",
                "is_good": 1
            }]
        }])
    );
}

#[tokio::test]
async fn test_questions_of_missing_level_is_not_found() {
    let app = setup_app().await;

    let (status, body) = app.get("/levels/999/questions").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Level not found");
}

#[tokio::test]
async fn test_level_without_questions_lists_empty() {
    let app = setup_app().await;
    let (_, level) = app
        .admin("POST", "/admin/levels", Some(json!({"level_name": "animals"})))
        .await;

    let (status, body) = app
        .get(&format!("/levels/{}/questions", level["level_id"]))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_delete_level_cascades() {
    let app = setup_app().await;
    let (level_id, question_id, answer_id) = app.seed_flashcard("weather", "sunny", "słonecznie").await;
    let (other_level, other_question, other_answer) =
        app.seed_flashcard("colors", "blue", "niebieski").await;

    let (status, body) = app
        .admin("DELETE", &format!("/admin/levels/{level_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"detail": "Level deleted"}));

    assert!(
        app.state
            .levels
            .find_by_id(LevelId::new(level_id as i32))
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        app.state
            .questions
            .find_with_answers(QuestionId::new(question_id as i32))
            .await
            .unwrap()
            .is_none()
    );
    let (status, _) = app
        .admin("GET", &format!("/admin/answers/{answer_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The other level is untouched.
    let (_, questions) = app.get(&format!("/levels/{other_level}/questions")).await;
    assert_eq!(questions[0]["question_id"], other_question);
    assert_eq!(questions[0]["answers"][0]["answer_id"], other_answer);

    let (status, _) = app
        .admin("DELETE", &format!("/admin/levels/{level_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_question_cascades_to_answers() {
    let app = setup_app().await;
    let (level_id, question_id, answer_id) = app.seed_flashcard("colors", "red", "czerwony").await;

    let (status, body) = app
        .admin("DELETE", &format!("/admin/questions/{question_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"detail": "Question deleted"}));

    let (status, _) = app
        .admin("GET", &format!("/admin/answers/{answer_id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, levels) = app.admin("GET", "/admin/levels", None).await;
    assert_eq!(
        levels,
        json!([{"level_id": level_id, "level_name": "colors", "questions_count": 0}])
    );
}

#[tokio::test]
async fn test_admin_levels_count_questions() {
    let app = setup_app().await;
    let (level_id, _, _) = app.seed_flashcard("colors", "red", "czerwony").await;
    app.admin(
        "POST",
        "/admin/questions",
        Some(json!({"level_id": level_id, "question": "green"})),
    )
    .await;
    let (_, empty) = app
        .admin("POST", "/admin/levels", Some(json!({"level_name": "animals"})))
        .await;

    let (status, levels) = app.admin("GET", "/admin/levels", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        levels,
        json!([
            {"level_id": level_id, "level_name": "colors", "questions_count": 2},
            {"level_id": empty["level_id"], "level_name": "animals", "questions_count": 0}
        ])
    );
}

#[tokio::test]
async fn test_duplicate_level_name_rejected() {
    let app = setup_app().await;
    app.admin("POST", "/admin/levels", Some(json!({"level_name": "colors"})))
        .await;
    let (_, other) = app
        .admin("POST", "/admin/levels", Some(json!({"level_name": "animals"})))
        .await;

    let (status, body) = app
        .admin("POST", "/admin/levels", Some(json!({"level_name": "colors"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Level already exists");

    let (status, _) = app
        .admin(
            "PUT",
            &format!("/admin/levels/{}", other["level_id"]),
            Some(json!({"level_name": "colors"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, levels) = app.get("/levels").await;
    assert_eq!(levels.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_rename_level() {
    let app = setup_app().await;
    let (_, level) = app
        .admin("POST", "/admin/levels", Some(json!({"level_name": "colours"})))
        .await;
    let uri = format!("/admin/levels/{}", level["level_id"]);

    // Renaming to its own name is not a conflict.
    let (status, _) = app
        .admin("PUT", &uri, Some(json!({"level_name": "colours"})))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .admin("PUT", &uri, Some(json!({"level_name": "colors"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["level_name"], "colors");

    let (status, _) = app
        .admin("PUT", "/admin/levels/999", Some(json!({"level_name": "x"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_question_requires_existing_level() {
    let app = setup_app().await;

    let (status, body) = app
        .admin(
            "POST",
            "/admin/questions",
            Some(json!({"level_id": 42, "question": "red"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Level not found");
}

#[tokio::test]
async fn test_answer_requires_existing_question() {
    let app = setup_app().await;

    let (status, body) = app
        .admin(
            "POST",
            "/admin/answers",
            Some(json!({"question_id": 42, "answer": "czerwony", "is_good": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Question not found");
}

#[tokio::test]
async fn test_answer_flag_must_be_binary() {
    let app = setup_app().await;
    let (_, question_id, answer_id) = app.seed_flashcard("colors", "red", "czerwony").await;

    let (status, _) = app
        .admin(
            "POST",
            "/admin/answers",
            Some(json!({"question_id": question_id, "answer": "zielony", "is_good": 2})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .admin(
            "PUT",
            &format!("/admin/answers/{answer_id}"),
            Some(json!({"answer": "czerwona", "is_good": 0})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "czerwona");
    assert_eq!(body["is_good"], 0);
}

#[tokio::test]
async fn test_update_question_keeps_answers() {
    let app = setup_app().await;
    let (_, question_id, answer_id) = app.seed_flashcard("colors", "red", "czerwony").await;

    let (status, body) = app
        .admin(
            "PUT",
            &format!("/admin/questions/{question_id}"),
            Some(json!({"question": "dark red"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], "dark red");
    assert_eq!(body["answers"][0]["answer_id"], answer_id);

    let (status, _) = app
        .admin("PUT", "/admin/questions/999", Some(json!({"question": "x"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_level_name_rejected() {
    let app = setup_app().await;

    let (status, body) = app
        .admin("POST", "/admin/levels", Some(json!({"level_name": "  "})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_level_delete_with_many_questions() {
    let app = setup_app().await;
    let (level_id, _, _) = app.seed_flashcard("numbers", "one", "jeden").await;
    let (other_level_id, other_question_id, _) =
        app.seed_flashcard("colors", "red", "czerwony").await;
    let level_id = LevelId::new(level_id as i32);

    // More questions than SQLite allows bound parameters in one statement.
    for i in 0..1_100 {
        let question = app
            .state
            .questions
            .create(NewQuestion {
                level_id,
                text: QuestionText::new(format!("question {i}")).unwrap(),
            })
            .await
            .unwrap();
        app.state
            .answers
            .create(NewAnswer {
                question_id: question.question.id,
                text: AnswerText::new(format!("answer {i}")).unwrap(),
                flag: AnswerFlag::Correct,
            })
            .await
            .unwrap();
    }

    let (status, _) = app
        .admin("DELETE", &format!("/admin/levels/{level_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let answers = app.state.answers.list().await.unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].question_id, QuestionId::new(other_question_id as i32));

    let (status, body) = app
        .get(&format!("/levels/{other_level_id}/questions"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}
