mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::common::{
    Action, Flow, sample_questions, seed_course_with_quiz, setup_server, setup_test_db,
    student_register_action, teacher_register_action,
};

fn submit_action(quiz_id: Uuid, body: serde_json::Value) -> Action {
    Action::new("quiz_submit", "POST", &format!("/api/v1/quizzes/{quiz_id}/submit"))
        .with_body(body)
}

#[tokio::test]
async fn route_quiz_submit_test() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let mut server = setup_server(&db).await;

    // question i is correct on option i % 4
    let (_course_id, quiz_id) = seed_course_with_quiz(&db, sample_questions(5)).await;

    Flow::new()
        .step(student_register_action("Meena", "meena@example.com", "pw123456"))
        // 4 of 5 correct in 240s: inside the 5*60s speed window, below the
        // 90% accuracy line, not fast enough for Fast Solver
        .step(
            submit_action(
                quiz_id,
                json!({
                    "answers": { "0": 0, "1": 1, "2": 2, "3": 3, "4": 2 },
                    "time_taken_seconds": 240,
                }),
            )
            .assert_body(|body| {
                assert_eq!(body["score"], 4);
                assert_eq!(body["accuracy"], 80);
                assert_eq!(body["xp_earned"], 60);
                assert_eq!(body["new_badges"], json!([]));
            }),
        )
        // perfect and fast: both badges, 50 + 20 + 30 XP
        .step(
            submit_action(
                quiz_id,
                json!({
                    "answers": { "0": 0, "1": 1, "2": 2, "3": 3, "4": 0 },
                    "time_taken_seconds": 100,
                }),
            )
            .assert_body(|body| {
                assert_eq!(body["score"], 5);
                assert_eq!(body["accuracy"], 100);
                assert_eq!(body["xp_earned"], 100);
                let badges = body["new_badges"].as_array().unwrap();
                assert!(badges.contains(&json!("Top Scorer")));
                assert!(badges.contains(&json!("Fast Solver")));
            }),
        )
        // a repeat perfect run: XP accrues again, the profile badge set does not grow
        .step(
            submit_action(
                quiz_id,
                json!({
                    "answers": { "0": 0, "1": 1, "2": 2, "3": 3, "4": 0 },
                    "time_taken_seconds": 100,
                }),
            )
            .assert_body(|body| {
                assert_eq!(body["xp_earned"], 100);
            }),
        )
        .step(
            Action::new("attempt_history", "GET", "/api/v1/quizzes/attempts").assert_body(
                |body| {
                    let attempts = body.as_array().unwrap();
                    assert_eq!(attempts.len(), 3);
                    let total: i64 = attempts
                        .iter()
                        .map(|a| a["xp_earned"].as_i64().unwrap())
                        .sum();
                    assert_eq!(total, 260);
                },
            ),
        )
        .step(
            Action::new("global_board", "GET", "/api/v1/leaderboard/global").assert_body(|body| {
                let entries = body.as_array().unwrap();
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0]["xp"], 60 + 100 + 100);
                let badges = entries[0]["badges"].as_array().unwrap();
                assert_eq!(badges.len(), 2);
            }),
        )
        .step(
            Action::new("rank", "GET", "/api/v1/leaderboard/rank").assert_body(|body| {
                assert_eq!(body["rank"], 1);
                assert_eq!(body["total_students"], 1);
            }),
        )
        .run(&mut server, db)
        .await;
}

#[tokio::test]
async fn route_quiz_submit_rejects_test() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let mut server = setup_server(&db).await;

    let (_course_id, quiz_id) = seed_course_with_quiz(&db, sample_questions(3)).await;

    Flow::new()
        .step(student_register_action("Kiran", "kiran@example.com", "pw123456"))
        // negative duration
        .step(
            submit_action(
                quiz_id,
                json!({ "answers": {}, "time_taken_seconds": -5 }),
            )
            .with_expect(StatusCode::BAD_REQUEST),
        )
        // unknown quiz
        .step(
            submit_action(
                Uuid::new_v4(),
                json!({ "answers": {}, "time_taken_seconds": 10 }),
            )
            .with_expect(StatusCode::NOT_FOUND),
        )
        // teachers do not sit quizzes
        .step(
            teacher_register_action("Prof. Rao", "rao@example.com", "pw123456")
                .with_clear_cookies(true),
        )
        .step(
            submit_action(
                quiz_id,
                json!({ "answers": {}, "time_taken_seconds": 10 }),
            )
            .with_expect(StatusCode::FORBIDDEN),
        )
        .run(&mut server, db)
        .await;
}

#[tokio::test]
async fn route_quiz_get_hides_answers_test() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let mut server = setup_server(&db).await;

    let (_course_id, quiz_id) = seed_course_with_quiz(&db, sample_questions(2)).await;

    Flow::new()
        .step(student_register_action("Tara", "tara@example.com", "pw123456"))
        .step(
            Action::new("quiz_get", "GET", &format!("/api/v1/quizzes/{quiz_id}")).assert_body(
                |body| {
                    let questions = body["questions"].as_array().unwrap();
                    assert_eq!(questions.len(), 2);
                    for q in questions {
                        assert!(q.get("correct_index").is_none());
                        assert_eq!(q["options"].as_array().unwrap().len(), 4);
                    }
                },
            ),
        )
        .run(&mut server, db)
        .await;
}
