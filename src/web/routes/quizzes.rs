use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    model::{
        DatabaseError, ResourceTyped,
        entity::{Note, Quiz, QuizAttempt, QuizAttemptCreate, QuizCreate, StudentProfile},
        scoring,
    },
    web::{
        AppState, RequestContext, UserRole, WebError, WebResult,
        dto::quizzes::{GenerateQuizRequest, QuizResponse, QuizSubmitRequest, QuizSubmitResponse},
        error::ErrorResponse,
        middlewares,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/generate", post(quiz_generate_handler))
        .route("/attempts", get(quiz_attempts_handler))
        .route("/{id}", get(quiz_get_handler))
        .route("/{id}/submit", post(quiz_submit_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/v1/quizzes/generate",
    request_body = GenerateQuizRequest,
    description = "Generates a quiz from uploaded notes via the AI model, teachers only",
    responses(
        (status = 200, description = "Quiz generated and stored", body = QuizResponse),
        (status = 400, description = "Notes content is empty", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 404, description = "Notes not found", body = ErrorResponse),
        (status = 502, description = "Quiz generation failed", body = ErrorResponse),
    ),
    tag = "quizzes",
    security(("cookie" = []))
)]
pub(crate) async fn quiz_generate_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<GenerateQuizRequest>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user_with_role(UserRole::Teacher)?;

    let note = Note::find_by_id(state.mm(), payload.notes_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Note::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(Note::get_resource_type()))?;

    let content = note.content().unwrap_or_default();
    if content.is_empty() {
        return Err(WebError::bad_request("notes content is empty"));
    }

    let questions = state
        .generator()
        .generate_from_notes(note.title(), content)
        .await
        .map_err(WebError::server_ai_error)?;

    let quiz = Quiz::create(
        state.mm(),
        QuizCreate {
            course_id: note.course_id(),
            notes_id: Some(note.id()),
            created_by: user.user_id(),
            title: payload.title,
            questions,
        },
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(Quiz::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(QuizResponse::from_entity(&quiz))))
}

#[utoipa::path(
    get,
    path = "/api/v1/quizzes/{id}",
    description = "Fetches one quiz with the correct answers stripped",
    responses(
        (status = 200, description = "Quiz found", body = QuizResponse),
        (status = 404, description = "Quiz not found", body = ErrorResponse),
    ),
    tag = "quizzes",
    security(("cookie" = []))
)]
pub(crate) async fn quiz_get_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;

    let quiz = Quiz::find_by_id(state.mm(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Quiz::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(Quiz::get_resource_type()))?;

    Ok((StatusCode::OK, Json(QuizResponse::from_entity(&quiz))))
}

#[utoipa::path(
    post,
    path = "/api/v1/quizzes/{id}/submit",
    request_body = QuizSubmitRequest,
    description = "Scores a quiz attempt and credits XP and badges, students only",
    responses(
        (status = 200, description = "Attempt scored", body = QuizSubmitResponse),
        (status = 400, description = "Malformed submission", body = ErrorResponse),
        (status = 403, description = "Student role required", body = ErrorResponse),
        (status = 404, description = "Quiz or student profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "quizzes",
    security(("cookie" = []))
)]
pub(crate) async fn quiz_submit_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<QuizSubmitRequest>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user_with_role(UserRole::Student)?;

    if payload.time_taken_seconds < 0 {
        return Err(WebError::bad_request("time_taken_seconds must be >= 0"));
    }
    let time_taken: i32 = payload
        .time_taken_seconds
        .try_into()
        .map_err(|_| WebError::bad_request("time_taken_seconds out of range"))?;

    let quiz = Quiz::find_by_id(state.mm(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Quiz::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(Quiz::get_resource_type()))?;

    let score = scoring::score_attempt(quiz.questions(), &payload.answers, payload.time_taken_seconds);

    // Attempt insert and XP/badge credit commit together or not at all; a
    // saved attempt with uncredited XP would leave the student short.
    let mut tx = state
        .mm()
        .executor()
        .begin()
        .await
        .map_err(|e| db_error(e.into()))?;

    QuizAttempt::create(
        &mut *tx,
        QuizAttemptCreate {
            quiz_id: quiz.id(),
            student_id: user.user_id(),
            score: score.correct_count,
            total_questions: score.total_questions,
            accuracy: score.accuracy,
            time_taken_seconds: time_taken,
            xp_earned: score.xp_earned,
            answers: payload.answers.clone(),
        },
    )
    .await
    .map_err(db_error)?;

    StudentProfile::award_xp_and_badges(&mut *tx, user.user_id(), score.xp_earned, &score.new_badges)
        .await
        .map_err(|e| match e {
            DatabaseError::SqlxError(sqlx::Error::RowNotFound) => {
                WebError::resource_not_found(StudentProfile::get_resource_type())
            }
            other => db_error(other),
        })?;

    tx.commit().await.map_err(|e| db_error(e.into()))?;

    Ok((
        StatusCode::OK,
        Json(QuizSubmitResponse::from_score(score, payload.time_taken_seconds)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/quizzes/attempts",
    description = "Lists the calling student's attempts, newest first",
    responses(
        (status = 200, description = "Attempts", body = Vec<QuizAttempt>),
        (status = 403, description = "Student role required", body = ErrorResponse),
    ),
    tag = "quizzes",
    security(("cookie" = []))
)]
pub(crate) async fn quiz_attempts_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user_with_role(UserRole::Student)?;

    let attempts = QuizAttempt::list_by_student(state.mm(), user.user_id())
        .await
        .map_err(db_error)?;

    Ok((StatusCode::OK, Json(attempts)))
}

fn db_error(e: DatabaseError) -> WebError {
    WebError::resource_fetch_error(QuizAttempt::get_resource_type(), e)
}
