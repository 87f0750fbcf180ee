use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::{
    model::{
        ResourceTyped,
        entity::StudentProfile,
        leaderboard::{CourseStandingRow, GlobalStandingRow, StudentRank},
    },
    web::{
        AppState, RequestContext, UserRole, WebError, WebResult,
        dto::leaderboard::{CourseLeaderboardEntry, GlobalLeaderboardEntry},
        error::ErrorResponse,
        middlewares,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/global", get(leaderboard_global_handler))
        .route("/course/{id}", get(leaderboard_course_handler))
        .route("/rank", get(leaderboard_rank_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/leaderboard/global",
    description = "Global standings: every profiled student ranked by XP descending",
    responses(
        (status = 200, description = "Ordered leaderboard", body = Vec<GlobalLeaderboardEntry>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
    ),
    tag = "leaderboard",
    security(("cookie" = []))
)]
pub(crate) async fn leaderboard_global_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;

    let rows = GlobalStandingRow::fetch_all(state.mm())
        .await
        .map_err(|e| WebError::resource_fetch_error(StudentProfile::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(GlobalLeaderboardEntry::ranked(rows))))
}

#[utoipa::path(
    get,
    path = "/api/v1/leaderboard/course/{id}",
    description = "Course standings: students with attempts in this course, ranked by course XP",
    responses(
        (status = 200, description = "Ordered leaderboard", body = Vec<CourseLeaderboardEntry>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
    ),
    tag = "leaderboard",
    security(("cookie" = []))
)]
pub(crate) async fn leaderboard_course_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    ctx.user()?;

    let rows = CourseStandingRow::fetch_for_course(state.mm(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(StudentProfile::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(CourseLeaderboardEntry::ranked(rows))))
}

#[utoipa::path(
    get,
    path = "/api/v1/leaderboard/rank",
    description = "The calling student's global rank and the total student count",
    responses(
        (status = 200, description = "Rank found", body = StudentRank),
        (status = 403, description = "Student role required", body = ErrorResponse),
        (status = 404, description = "Student has no profile", body = ErrorResponse),
    ),
    tag = "leaderboard",
    security(("cookie" = []))
)]
pub(crate) async fn leaderboard_rank_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> WebResult<impl IntoResponse> {
    let user = ctx.user_with_role(UserRole::Student)?;

    let rank = StudentRank::fetch(state.mm(), user.user_id())
        .await
        .map_err(|e| WebError::resource_fetch_error(StudentProfile::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(StudentProfile::get_resource_type()))?;

    Ok((StatusCode::OK, Json(rank)))
}
