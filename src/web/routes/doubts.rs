use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    model::{
        ResourceTyped,
        entity::{
            Course, Doubt, DoubtComment, DoubtCommentCreate, DoubtCommentWithAuthorRow,
            DoubtCreate, DoubtStatus,
        },
    },
    web::{
        AppState, RequestContext, UserRole, WebError, WebResult, error::ErrorResponse, middlewares,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", post(doubt_create_handler))
        .route("/{id}", get(doubt_get_handler))
        .route("/{id}/resolve", patch(doubt_resolve_handler))
        .route(
            "/{id}/comments",
            post(doubt_comment_create_handler).get(doubt_comments_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/v1/doubts/",
    request_body = DoubtCreate,
    description = "Raises a doubt in a course, students only",
    responses(
        (status = 200, description = "Doubt created", body = Doubt),
        (status = 403, description = "Student role required", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
    ),
    tag = "doubts",
    security(("cookie" = []))
)]
pub(crate) async fn doubt_create_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(mut payload): Json<DoubtCreate>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user_with_role(UserRole::Student)?;
    payload.student_id = user.user_id();

    Course::find_by_id(state.mm(), payload.course_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Course::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(Course::get_resource_type()))?;

    let doubt = Doubt::create(state.mm(), payload)
        .await
        .map_err(|e| WebError::resource_fetch_error(Doubt::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(doubt)))
}

#[utoipa::path(
    get,
    path = "/api/v1/doubts/{id}",
    description = "Fetches one doubt",
    responses(
        (status = 200, description = "Doubt found", body = Doubt),
        (status = 404, description = "Doubt not found", body = ErrorResponse),
    ),
    tag = "doubts",
    security(("cookie" = []))
)]
pub(crate) async fn doubt_get_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;

    let doubt = Doubt::find_by_id(state.mm(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Doubt::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(Doubt::get_resource_type()))?;

    Ok((StatusCode::OK, Json(doubt)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/doubts/{id}/resolve",
    description = "Marks a doubt as resolved",
    responses(
        (status = 200, description = "Doubt resolved"),
        (status = 404, description = "Doubt not found", body = ErrorResponse),
    ),
    tag = "doubts",
    security(("cookie" = []))
)]
pub(crate) async fn doubt_resolve_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;

    Doubt::find_by_id(state.mm(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Doubt::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(Doubt::get_resource_type()))?;

    Doubt::set_status(state.mm(), id, DoubtStatus::Resolved)
        .await
        .map_err(|e| WebError::resource_fetch_error(Doubt::get_resource_type(), e))?;

    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/v1/doubts/{id}/comments",
    request_body = DoubtCommentCreate,
    description = "Adds a comment to a doubt thread",
    responses(
        (status = 200, description = "Comment created", body = DoubtComment),
        (status = 404, description = "Doubt not found", body = ErrorResponse),
    ),
    tag = "doubts",
    security(("cookie" = []))
)]
pub(crate) async fn doubt_comment_create_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<DoubtCommentCreate>,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user()?;
    payload.doubt_id = id;
    payload.author_id = user.user_id();

    Doubt::find_by_id(state.mm(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Doubt::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(Doubt::get_resource_type()))?;

    let comment = DoubtComment::create(state.mm(), payload)
        .await
        .map_err(|e| WebError::resource_fetch_error(DoubtComment::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(comment)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/doubts/{id}/comments",
    description = "Lists a doubt's comments with their authors, oldest first",
    responses(
        (status = 200, description = "Comments", body = Vec<DoubtCommentWithAuthorRow>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
    ),
    tag = "doubts",
    security(("cookie" = []))
)]
pub(crate) async fn doubt_comments_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;

    let comments = DoubtCommentWithAuthorRow::list_by_doubt(state.mm(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(DoubtComment::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(comments)).into_response())
}
