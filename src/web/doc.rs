use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub struct CookieAuthModifier;

impl Modify for CookieAuthModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(schema) = openapi.components.as_mut() {
            schema.add_security_scheme(
                "cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "SID",
                    "JWT token for current user",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::routes::auth::student_register_handler,
        crate::web::routes::auth::student_login_handler,
        crate::web::routes::auth::teacher_register_handler,
        crate::web::routes::auth::teacher_login_handler,
        crate::web::routes::courses::course_create_handler,
        crate::web::routes::courses::course_list_handler,
        crate::web::routes::courses::course_get_handler,
        crate::web::routes::courses::course_notes_handler,
        crate::web::routes::courses::course_quizzes_handler,
        crate::web::routes::courses::course_doubts_handler,
        crate::web::routes::notes::note_create_handler,
        crate::web::routes::notes::note_get_handler,
        crate::web::routes::quizzes::quiz_generate_handler,
        crate::web::routes::quizzes::quiz_attempts_handler,
        crate::web::routes::quizzes::quiz_get_handler,
        crate::web::routes::quizzes::quiz_submit_handler,
        crate::web::routes::leaderboard::leaderboard_global_handler,
        crate::web::routes::leaderboard::leaderboard_course_handler,
        crate::web::routes::leaderboard::leaderboard_rank_handler,
        crate::web::routes::doubts::doubt_create_handler,
        crate::web::routes::doubts::doubt_get_handler,
        crate::web::routes::doubts::doubt_resolve_handler,
        crate::web::routes::doubts::doubt_comment_create_handler,
        crate::web::routes::doubts::doubt_comments_handler,
        crate::web::routes::teacher::verification_test_handler,
        crate::web::routes::teacher::teacher_courses_handler,
        crate::web::routes::teacher::teacher_stats_handler,
    ),
    modifiers(&CookieAuthModifier),
)]
pub struct ApiDoc;
