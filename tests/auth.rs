mod common;

use axum::http::StatusCode;
use acadex::web::middlewares::AUTH_TOKEN;
use tower_cookies::cookie::SameSite;

use crate::common::{
    Flow, setup_server, setup_test_db, student_login_action, student_register_action,
    teacher_login_action, teacher_register_action,
};

#[tokio::test]
async fn route_student_register_test() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let mut server = setup_server(&db).await;

    Flow::new()
        .step(
            student_register_action("Asha", "asha@example.com", "hunter42")
                .assert_cookie(AUTH_TOKEN, |cookie| {
                    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
                    assert_eq!(cookie.path(), Some("/"));
                    assert_eq!(cookie.http_only(), Some(true));
                })
                .assert_body(|body| {
                    assert_eq!(body["user"]["name"], "Asha");
                    assert_eq!(body["user"]["role"], "student");
                    assert_eq!(body["profile"]["xp"], 0);
                    assert_eq!(body["profile"]["badges"], serde_json::json!([]));
                })
                .with_expect(StatusCode::OK),
        )
        // the email is taken now
        .step(
            student_register_action("Asha Again", "asha@example.com", "hunter42")
                .with_expect(StatusCode::CONFLICT),
        )
        // the rejected duplicate left nothing behind: the original account
        // still signs in with its profile intact
        .step(
            student_login_action("asha@example.com", "hunter42")
                .with_clear_cookies(true)
                .assert_body(|body| {
                    assert_eq!(body["user"]["name"], "Asha");
                    assert_eq!(body["profile"]["xp"], 0);
                })
                .with_expect(StatusCode::OK),
        )
        .run(&mut server, db)
        .await;
}

#[tokio::test]
async fn route_student_login_test() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let mut server = setup_server(&db).await;

    Flow::new()
        .step(
            student_register_action("Ravi", "ravi@example.com", "secret99").with_save_cookies(false),
        )
        .step(
            student_login_action("ravi@example.com", "secret99")
                .with_clear_cookies(true)
                .assert_cookie(AUTH_TOKEN, |cookie| {
                    assert_eq!(cookie.http_only(), Some(true));
                })
                .assert_body(|body| {
                    assert_eq!(body["user"]["email"], "ravi@example.com");
                })
                .with_expect(StatusCode::OK),
        )
        // wrong password
        .step(
            student_login_action("ravi@example.com", "WRONG")
                .with_save_cookies(false)
                .with_clear_cookies(true)
                .with_expect(StatusCode::UNAUTHORIZED),
        )
        // a student account cannot sign in through the teacher endpoint
        .step(
            teacher_login_action("ravi@example.com", "secret99")
                .with_save_cookies(false)
                .with_expect(StatusCode::UNAUTHORIZED),
        )
        // non-existing account
        .step(
            student_login_action("nobody@example.com", "nvm")
                .with_expect(StatusCode::UNAUTHORIZED),
        )
        .run(&mut server, db)
        .await;
}

#[tokio::test]
async fn route_teacher_register_test() {
    let Some(db) = setup_test_db().await else {
        return;
    };
    let mut server = setup_server(&db).await;

    Flow::new()
        .step(
            teacher_register_action("Prof. Iyer", "iyer@example.com", "chalk&talk")
                .assert_body(|body| {
                    assert_eq!(body["user"]["role"], "teacher");
                    assert_eq!(body["profile"]["status"], "pending");
                })
                .with_expect(StatusCode::OK),
        )
        .step(
            teacher_login_action("iyer@example.com", "chalk&talk")
                .with_clear_cookies(true)
                .with_expect(StatusCode::OK),
        )
        .run(&mut server, db)
        .await;
}
