use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use chrono::Duration;
use tower_cookies::{Cookie, Cookies, cookie::SameSite};
use uuid::Uuid;

use crate::{
    Config, auth,
    auth::{UserClaims, hash_password, verify_password},
    model::{
        DatabaseError, ResourceTyped,
        entity::{
            StudentProfile, StudentProfileCreate, TeacherProfile, TeacherProfileCreate,
            UserEntity, UserEntityCreate,
        },
    },
    web::{
        AppState, UserRole, WebError, WebResult,
        dto::auth::{
            LoginRequest, StudentAuthResponse, StudentRegisterRequest, TeacherAuthResponse,
            TeacherRegisterRequest,
        },
        error::ErrorResponse,
        middlewares::AUTH_TOKEN,
    },
};

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/student/register", post(student_register_handler))
        .route("/student/login", post(student_login_handler))
        .route("/teacher/register", post(teacher_register_handler))
        .route("/teacher/login", post(teacher_login_handler))
        .with_state(state)
}

async fn issue_session_cookie(cookies: &Cookies, user_id: Uuid) -> WebResult<()> {
    let timestamp = (chrono::Utc::now() + Duration::days(1)).timestamp();
    let jwt_secret = Config::get_or_init(false).await.app().jwt();

    let claims = UserClaims {
        sub: user_id.to_string(),
        exp: timestamp,
    };
    let token = auth::generate_token(claims, jwt_secret)
        .map_err(|e| WebError::server_crypt_error(e.into()))?;

    let mut cookie = Cookie::new(AUTH_TOKEN, token);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookies.add(cookie);
    Ok(())
}

/// Inserts the user row inside the caller's registration transaction. The
/// `users.email` unique constraint is the source of truth for conflicts, so
/// two racing registrations cannot both slip past a pre-check.
async fn create_user(
    conn: &mut sqlx::PgConnection,
    name: String,
    email: String,
    mobile: String,
    password: &str,
    role: UserRole,
) -> WebResult<UserEntity> {
    let hash = hash_password(password).map_err(WebError::server_crypt_error)?;
    let created = UserEntity::create(
        &mut *conn,
        UserEntityCreate {
            name,
            email,
            password_hash: hash,
            mobile,
            role,
        },
    )
    .await
    .map_err(|e| match e {
        DatabaseError::SqlxError(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            WebError::registration_conflict()
        }
        other => WebError::resource_fetch_error(UserEntity::get_resource_type(), other),
    })?;

    Ok(created)
}

fn user_db_error(e: sqlx::Error) -> WebError {
    WebError::resource_fetch_error(UserEntity::get_resource_type(), e.into())
}

async fn authenticate(state: &AppState, payload: &LoginRequest, role: UserRole) -> WebResult<UserEntity> {
    let user = UserEntity::find_by_email(state.mm(), &payload.email)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    let user = match user {
        Some(user) if user.role() == role => user,
        _ => return Err(WebError::auth_invalid_credentials()),
    };

    let valid = verify_password(&payload.password, user.hash())
        .map_err(WebError::server_crypt_error)?;
    if !valid {
        return Err(WebError::auth_invalid_credentials());
    }

    Ok(user)
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/student/register",
    request_body = StudentRegisterRequest,
    description = "Registers a student account with its profile",
    responses(
        (status = 200, description = "Student registered", body = StudentAuthResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub(crate) async fn student_register_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<StudentRegisterRequest>,
) -> WebResult<impl IntoResponse> {
    // User and profile land together or not at all; a user row without its
    // profile would occupy the email while every login 404s.
    let mut tx = state
        .mm()
        .executor()
        .begin()
        .await
        .map_err(user_db_error)?;

    let user = create_user(
        &mut *tx,
        payload.name,
        payload.email,
        payload.mobile,
        &payload.password,
        UserRole::Student,
    )
    .await?;

    let profile = StudentProfile::create(
        &mut *tx,
        StudentProfileCreate {
            user_id: user.id(),
            class_year: payload.class_year,
            branch: payload.branch,
            college_name: payload.college_name,
        },
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(StudentProfile::get_resource_type(), e))?;

    tx.commit().await.map_err(user_db_error)?;

    issue_session_cookie(&cookies, user.id()).await?;

    Ok((StatusCode::OK, Json(StudentAuthResponse { user, profile })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/student/login",
    request_body = LoginRequest,
    description = "Authorizes a student in the system",
    responses(
        (status = 200, description = "Student signed in", body = StudentAuthResponse),
        (status = 401, description = "Credentials invalid", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub(crate) async fn student_login_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> WebResult<impl IntoResponse> {
    let user = authenticate(&state, &payload, UserRole::Student).await?;

    let profile = StudentProfile::find_by_user(state.mm(), user.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(StudentProfile::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(StudentProfile::get_resource_type()))?;

    issue_session_cookie(&cookies, user.id()).await?;

    Ok((StatusCode::OK, Json(StudentAuthResponse { user, profile })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/teacher/register",
    request_body = TeacherRegisterRequest,
    description = "Registers a teacher account with its profile (pending verification)",
    responses(
        (status = 200, description = "Teacher registered", body = TeacherAuthResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub(crate) async fn teacher_register_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<TeacherRegisterRequest>,
) -> WebResult<impl IntoResponse> {
    let mut tx = state
        .mm()
        .executor()
        .begin()
        .await
        .map_err(user_db_error)?;

    let user = create_user(
        &mut *tx,
        payload.name,
        payload.email,
        payload.mobile,
        &payload.password,
        UserRole::Teacher,
    )
    .await?;

    let profile = TeacherProfile::create(
        &mut *tx,
        TeacherProfileCreate {
            user_id: user.id(),
            department: payload.department,
            experience_years: payload.experience_years,
        },
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(TeacherProfile::get_resource_type(), e))?;

    tx.commit().await.map_err(user_db_error)?;

    issue_session_cookie(&cookies, user.id()).await?;

    Ok((StatusCode::OK, Json(TeacherAuthResponse { user, profile })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/teacher/login",
    request_body = LoginRequest,
    description = "Authorizes a teacher in the system",
    responses(
        (status = 200, description = "Teacher signed in", body = TeacherAuthResponse),
        (status = 401, description = "Credentials invalid", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub(crate) async fn teacher_login_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> WebResult<impl IntoResponse> {
    let user = authenticate(&state, &payload, UserRole::Teacher).await?;

    let profile = TeacherProfile::find_by_user(state.mm(), user.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(TeacherProfile::get_resource_type(), e))?
        .ok_or_else(|| WebError::resource_not_found(TeacherProfile::get_resource_type()))?;

    issue_session_cookie(&cookies, user.id()).await?;

    Ok((StatusCode::OK, Json(TeacherAuthResponse { user, profile })))
}
