mod common;

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{
    Action, Flow, setup_server, setup_test_db, student_register_action, teacher_register_action,
};

#[tokio::test]
async fn route_course_and_notes_test() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let mut server = setup_server(&db).await;

    Flow::new()
        .step(student_register_action("Nila", "nila@example.com", "pw123456"))
        // students cannot create courses
        .step(
            Action::new("course_create", "POST", "/api/v1/courses/")
                .with_body(json!({
                    "title": "Signals",
                    "description": "nope",
                    "class_year": "3",
                    "branch": "ECE",
                }))
                .with_expect(StatusCode::FORBIDDEN),
        )
        .step(
            teacher_register_action("Prof. Bose", "bose@example.com", "pw123456")
                .with_clear_cookies(true),
        )
        .step(
            Action::new("course_create", "POST", "/api/v1/courses/")
                .with_body(json!({
                    "title": "Signals and Systems",
                    "description": "Convolution, transforms and friends",
                    "class_year": "3",
                    "branch": "ECE",
                }))
                .assert_body(|body| {
                    assert_eq!(body["title"], "Signals and Systems");
                })
                .with_save_as("course"),
        )
        .step(
            Action::new("note_create", "POST", "/api/v1/notes/")
                .with_dyn_body(|ctx| {
                    json!({
                        "course_id": ctx.get("course")["id"],
                        "title": "Week 1",
                        "content": "The unit impulse and why it matters.",
                    })
                })
                .assert_body(|body| {
                    assert_eq!(body["title"], "Week 1");
                })
                .with_save_as("note"),
        )
        .step(
            Action::new("note_get", "GET", "dynamic")
                .with_dyn_path(|ctx| format!("/api/v1/notes/{}", ctx.get("note")["id"].as_str().unwrap()))
                .assert_body(|body| {
                    assert_eq!(body["content"], "The unit impulse and why it matters.");
                }),
        )
        .step(
            Action::new("course_notes", "GET", "dynamic")
                .with_dyn_path(|ctx| {
                    format!("/api/v1/courses/{}/notes", ctx.get("course")["id"].as_str().unwrap())
                })
                .assert_body(|body| {
                    assert_eq!(body.as_array().unwrap().len(), 1);
                }),
        )
        .step(
            Action::new("course_list", "GET", "/api/v1/courses/").assert_body(|body| {
                assert_eq!(body.as_array().unwrap().len(), 1);
            }),
        )
        .step(
            Action::new("teacher_stats", "GET", "/api/v1/teacher/stats").assert_body(|body| {
                assert_eq!(body["courses_count"], 1);
                assert_eq!(body["notes_count"], 1);
                assert_eq!(body["quizzes_count"], 0);
                assert_eq!(body["attempts_count"], 0);
            }),
        )
        .run(&mut server, db)
        .await;
}

#[tokio::test]
async fn route_doubts_test() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let mut server = setup_server(&db).await;

    Flow::new()
        .step(teacher_register_action("Prof. Das", "das@example.com", "pw123456"))
        .step(
            Action::new("course_create", "POST", "/api/v1/courses/")
                .with_body(json!({
                    "title": "Thermodynamics",
                    "description": "Heat and work",
                    "class_year": "2",
                    "branch": "ME",
                }))
                .with_save_as("course"),
        )
        .step(
            student_register_action("Omar", "omar@example.com", "pw123456")
                .with_clear_cookies(true),
        )
        .step(
            Action::new("doubt_create", "POST", "/api/v1/doubts/")
                .with_dyn_body(|ctx| {
                    json!({
                        "course_id": ctx.get("course")["id"],
                        "title": "Entropy sign convention",
                        "description": "Why is dS >= dQ/T and not the other way around?",
                    })
                })
                .assert_body(|body| {
                    assert_eq!(body["status"], "open");
                })
                .with_save_as("doubt"),
        )
        .step(
            Action::new("doubt_comment", "POST", "dynamic")
                .with_dyn_path(|ctx| {
                    format!("/api/v1/doubts/{}/comments", ctx.get("doubt")["id"].as_str().unwrap())
                })
                .with_body(json!({ "text": "Think about irreversibility." })),
        )
        .step(
            Action::new("doubt_comments", "GET", "dynamic")
                .with_dyn_path(|ctx| {
                    format!("/api/v1/doubts/{}/comments", ctx.get("doubt")["id"].as_str().unwrap())
                })
                .assert_body(|body| {
                    let comments = body.as_array().unwrap();
                    assert_eq!(comments.len(), 1);
                    assert_eq!(comments[0]["author_name"], "Omar");
                    assert_eq!(comments[0]["author_role"], "student");
                }),
        )
        .step(
            Action::new("doubt_resolve", "PATCH", "dynamic").with_dyn_path(|ctx| {
                format!("/api/v1/doubts/{}/resolve", ctx.get("doubt")["id"].as_str().unwrap())
            }),
        )
        .step(
            Action::new("doubt_get", "GET", "dynamic")
                .with_dyn_path(|ctx| {
                    format!("/api/v1/doubts/{}", ctx.get("doubt")["id"].as_str().unwrap())
                })
                .assert_body(|body| {
                    assert_eq!(body["status"], "resolved");
                }),
        )
        // raising a doubt against a missing course fails
        .step(
            Action::new("doubt_create", "POST", "/api/v1/doubts/")
                .with_body(json!({
                    "course_id": uuid::Uuid::new_v4(),
                    "title": "ghost",
                    "description": "ghost",
                }))
                .with_expect(StatusCode::NOT_FOUND),
        )
        .run(&mut server, db)
        .await;
}

#[tokio::test]
async fn route_verification_test() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let mut server = setup_server(&db).await;

    Flow::new()
        .step(teacher_register_action("Prof. Nair", "nair@example.com", "pw123456"))
        // 2 of 5 correct is 40, below the pass line
        .step(
            Action::new("verification", "POST", "/api/v1/teacher/verification-test")
                .with_body(json!({
                    "answers": { "q1": "1", "q2": "0", "q3": "0", "q4": "2", "q5": "0" }
                }))
                .assert_body(|body| {
                    assert_eq!(body["passed"], false);
                    assert_eq!(body["score"], 40);
                }),
        )
        // retake with a passing sheet
        .step(
            Action::new("verification", "POST", "/api/v1/teacher/verification-test")
                .with_body(json!({
                    "answers": { "q1": "1", "q2": "2", "q3": "1", "q4": "2", "q5": "1" }
                }))
                .assert_body(|body| {
                    assert_eq!(body["passed"], true);
                    assert_eq!(body["score"], 100);
                }),
        )
        .run(&mut server, db)
        .await;
}
