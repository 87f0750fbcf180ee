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
        entity::{Course, Note, NoteCreate},
    },
    web::{
        AppState, RequestContext, UserRole, WebError, WebResult, error::ErrorResponse, middlewares,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", post(note_create_handler))
        .route("/{id}", get(note_get_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/v1/notes/",
    request_body = NoteCreate,
    description = "Uploads notes for a course, teachers only",
    responses(
        (status = 200, description = "Notes created", body = Note),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
    ),
    tag = "notes",
    security(("cookie" = []))
)]
pub(crate) async fn note_create_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(mut payload): Json<NoteCreate>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user_with_role(UserRole::Teacher)?;
    payload.teacher_id = user.user_id();

    Course::find_by_id(state.mm(), payload.course_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(Course::get_resource_type()))?;

    let note = Note::create(state.mm(), payload)
        .await
        .map_err(|e| WebError::resource_fetch_error(Note::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(note)))
}

#[utoipa::path(
    get,
    path = "/api/v1/notes/{id}",
    description = "Fetches one notes entry",
    responses(
        (status = 200, description = "Notes found", body = Note),
        (status = 404, description = "Notes not found", body = ErrorResponse),
    ),
    tag = "notes",
    security(("cookie" = []))
)]
pub(crate) async fn note_get_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;

    let note = Note::find_by_id(state.mm(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Note::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(Note::get_resource_type()))?;

    Ok((StatusCode::OK, Json(note)))
}
