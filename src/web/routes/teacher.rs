use axum::{
    Json, Router, extract::State, http::StatusCode, middleware, response::IntoResponse,
    routing::{get, post},
};

use crate::{
    model::{
        ResourceTyped,
        entity::{Course, TeacherProfile, TeacherStats},
    },
    web::{
        AppState, RequestContext, UserRole, WebError, WebResult,
        dto::teacher::{VerificationTestRequest, VerificationTestResponse},
        error::ErrorResponse,
        middlewares,
    },
};

/// Answer key of the fixed teacher verification test, by question order.
const VERIFICATION_ANSWER_KEY: [&str; 5] = ["1", "2", "1", "2", "1"];
/// Minimum percent score to be verified.
const VERIFICATION_PASS_SCORE: i32 = 60;

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/verification-test", post(verification_test_handler))
        .route("/courses", get(teacher_courses_handler))
        .route("/stats", get(teacher_stats_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/v1/teacher/verification-test",
    request_body = VerificationTestRequest,
    description = "Grades the teacher verification test and updates the profile status",
    responses(
        (status = 200, description = "Test graded", body = VerificationTestResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "teacher",
    security(("cookie" = []))
)]
pub(crate) async fn verification_test_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<VerificationTestRequest>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user_with_role(UserRole::Teacher)?;

    let mut correct = 0;
    for (question_id, answer) in &payload.answers {
        let index = question_id
            .strip_prefix('q')
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1));
        if let Some(index) = index {
            if VERIFICATION_ANSWER_KEY.get(index) == Some(&answer.as_str()) {
                correct += 1;
            }
        }
    }

    let score =
        (100.0 * correct as f64 / VERIFICATION_ANSWER_KEY.len() as f64).round() as i32;
    let passed = score >= VERIFICATION_PASS_SCORE;

    TeacherProfile::set_verification(
        state.mm(),
        user.user_id(),
        if passed { "verified" } else { "pending" },
        score,
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(TeacherProfile::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(VerificationTestResponse { passed, score })))
}

#[utoipa::path(
    get,
    path = "/api/v1/teacher/courses",
    description = "Lists the calling teacher's courses",
    responses(
        (status = 200, description = "Courses", body = Vec<Course>),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
    ),
    tag = "teacher",
    security(("cookie" = []))
)]
pub(crate) async fn teacher_courses_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user_with_role(UserRole::Teacher)?;

    let courses = Course::list_by_teacher(state.mm(), user.user_id())
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(courses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/teacher/stats",
    description = "Dashboard counters for the calling teacher",
    responses(
        (status = 200, description = "Stats", body = TeacherStats),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
    ),
    tag = "teacher",
    security(("cookie" = []))
)]
pub(crate) async fn teacher_stats_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user_with_role(UserRole::Teacher)?;

    let stats = TeacherStats::for_teacher(state.mm(), user.user_id())
        .await
        .map_err(|e| WebError::resource_fetch_error(TeacherProfile::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(stats)))
}
