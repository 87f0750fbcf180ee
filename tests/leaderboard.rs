mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::common::{
    Action, Flow, sample_questions, seed_course_with_quiz, setup_server, setup_test_db,
    student_register_action,
};

fn submit_action(quiz_id: Uuid, body: serde_json::Value) -> Action {
    Action::new("quiz_submit", "POST", &format!("/api/v1/quizzes/{quiz_id}/submit"))
        .with_body(body)
}

#[tokio::test]
async fn route_leaderboard_test() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let mut server = setup_server(&db).await;

    // two independent courses, one 3-question quiz each
    let (course_a, quiz_a) = seed_course_with_quiz(&db, sample_questions(3)).await;
    let (course_b, quiz_b) = seed_course_with_quiz(&db, sample_questions(3)).await;

    Flow::new()
        // Alpha, course A only: perfect and fast, 30 + 20 + 30 XP
        .step(student_register_action("Alpha", "alpha@example.com", "pw123456"))
        .step(submit_action(
            quiz_a,
            json!({ "answers": { "0": 0, "1": 1, "2": 2 }, "time_taken_seconds": 60 }),
        ))
        // Beta attempts both courses: 10 XP in A, 60 XP in B (perfect but slow)
        .step(
            student_register_action("Beta", "beta@example.com", "pw123456")
                .with_clear_cookies(true),
        )
        .step(submit_action(
            quiz_a,
            json!({ "answers": { "0": 0 }, "time_taken_seconds": 200 }),
        ))
        .step(submit_action(
            quiz_b,
            json!({ "answers": { "0": 0, "1": 1, "2": 2 }, "time_taken_seconds": 200 }),
        ))
        // Gamma attempts only course B: 2 of 3, 20 XP
        .step(
            student_register_action("Gamma", "gamma@example.com", "pw123456")
                .with_clear_cookies(true),
        )
        .step(submit_action(
            quiz_b,
            json!({ "answers": { "0": 0, "1": 1 }, "time_taken_seconds": 500 }),
        ))
        // Delta and Epsilon never attempt anything
        .step(
            student_register_action("Delta", "delta@example.com", "pw123456")
                .with_clear_cookies(true),
        )
        .step(
            student_register_action("Epsilon", "epsilon@example.com", "pw123456")
                .with_clear_cookies(true),
        )
        .step(
            Action::new("global_board", "GET", "/api/v1/leaderboard/global").assert_body(|body| {
                let entries = body.as_array().unwrap();
                assert_eq!(entries.len(), 5);

                assert_eq!(entries[0]["name"], "Alpha");
                assert_eq!(entries[0]["xp"], 80);
                assert_eq!(entries[0]["rank"], 1);
                assert_eq!(entries[0]["accuracy"], 100);

                // global XP sums across courses: 10 + 60
                assert_eq!(entries[1]["name"], "Beta");
                assert_eq!(entries[1]["xp"], 70);
                assert_eq!(entries[1]["accuracy"], 67);

                assert_eq!(entries[2]["name"], "Gamma");
                assert_eq!(entries[2]["xp"], 20);

                // XP ties order by user id ascending
                assert_eq!(entries[3]["xp"], 0);
                assert_eq!(entries[4]["xp"], 0);
                assert_eq!(entries[3]["accuracy"], 0);
                let d = entries[3]["user_id"].as_str().unwrap();
                let e = entries[4]["user_id"].as_str().unwrap();
                assert!(d < e);
            }),
        )
        .step(
            Action::new(
                "course_a_board",
                "GET",
                &format!("/api/v1/leaderboard/course/{course_a}"),
            )
            .assert_body(|body| {
                // only attempts in this course count: Gamma is absent and
                // Beta shows course XP, not the global aggregate
                let entries = body.as_array().unwrap();
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0]["name"], "Alpha");
                assert_eq!(entries[0]["course_xp"], 80);
                assert_eq!(entries[1]["name"], "Beta");
                assert_eq!(entries[1]["course_xp"], 10);
                assert_eq!(entries[1]["accuracy"], 33);
                assert!(!entries.iter().any(|e| e["name"] == "Gamma"));
            }),
        )
        .step(
            Action::new(
                "course_b_board",
                "GET",
                &format!("/api/v1/leaderboard/course/{course_b}"),
            )
            .assert_body(|body| {
                let entries = body.as_array().unwrap();
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0]["name"], "Beta");
                assert_eq!(entries[0]["course_xp"], 60);
                assert_eq!(entries[0]["accuracy"], 100);
                assert_eq!(entries[1]["name"], "Gamma");
                assert_eq!(entries[1]["course_xp"], 20);
                assert!(!entries.iter().any(|e| e["name"] == "Alpha"));
            }),
        )
        // the cookie still belongs to Epsilon
        .step(
            Action::new("rank", "GET", "/api/v1/leaderboard/rank").assert_body(|body| {
                assert_eq!(body["total_students"], 5);
                let rank = body["rank"].as_i64().unwrap();
                assert!(rank == 4 || rank == 5);
            }),
        )
        .run(&mut server, db)
        .await;
}

#[tokio::test]
async fn route_leaderboard_requires_auth_test() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let mut server = setup_server(&db).await;

    Flow::new()
        .step(
            Action::new("global_board", "GET", "/api/v1/leaderboard/global")
                .with_expect(StatusCode::UNAUTHORIZED),
        )
        .run(&mut server, db)
        .await;
}
