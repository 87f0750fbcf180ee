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
        ResourceTyped,
        entity::{Course, CourseCreate, Doubt, Note, Quiz},
    },
    web::{
        AppState, RequestContext, UserRole, WebError, WebResult,
        dto::quizzes::QuizResponse,
        error::ErrorResponse,
        middlewares,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", post(course_create_handler).get(course_list_handler))
        .route("/{id}", get(course_get_handler))
        .route("/{id}/notes", get(course_notes_handler))
        .route("/{id}/quizzes", get(course_quizzes_handler))
        .route("/{id}/doubts", get(course_doubts_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/v1/courses/",
    request_body = CourseCreate,
    description = "Creates a new course, teachers only",
    responses(
        (status = 200, description = "Course created", body = Course),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "courses",
    security(("cookie" = []))
)]
pub(crate) async fn course_create_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(mut payload): Json<CourseCreate>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user_with_role(UserRole::Teacher)?;
    payload.created_by = user.user_id();

    let course = Course::create(state.mm(), payload)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(course)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/",
    description = "Lists all courses, newest first",
    responses(
        (status = 200, description = "Courses", body = Vec<Course>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
    ),
    tag = "courses",
    security(("cookie" = []))
)]
pub(crate) async fn course_list_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;

    let courses = Course::list_all(state.mm())
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(courses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    description = "Fetches one course",
    responses(
        (status = 200, description = "Course found", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse),
    ),
    tag = "courses",
    security(("cookie" = []))
)]
pub(crate) async fn course_get_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;

    let course = Course::find_by_id(state.mm(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(Course::get_resource_type()))?;

    Ok((StatusCode::OK, Json(course)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/notes",
    description = "Lists the notes of a course",
    responses(
        (status = 200, description = "Notes", body = Vec<Note>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
    ),
    tag = "courses",
    security(("cookie" = []))
)]
pub(crate) async fn course_notes_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;

    let notes = Note::list_by_course(state.mm(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Note::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(notes)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/quizzes",
    description = "Lists the quizzes of a course, correct answers stripped",
    responses(
        (status = 200, description = "Quizzes", body = Vec<QuizResponse>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
    ),
    tag = "courses",
    security(("cookie" = []))
)]
pub(crate) async fn course_quizzes_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;

    let quizzes = Quiz::list_by_course(state.mm(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Quiz::get_resource_type(), e))?;

    let quizzes: Vec<QuizResponse> = quizzes.iter().map(QuizResponse::from_entity).collect();
    Ok((StatusCode::OK, Json(quizzes)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/doubts",
    description = "Lists the doubts raised in a course",
    responses(
        (status = 200, description = "Doubts", body = Vec<Doubt>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
    ),
    tag = "courses",
    security(("cookie" = []))
)]
pub(crate) async fn course_doubts_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;

    let doubts = Doubt::list_by_course(state.mm(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Doubt::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(doubts)))
}
