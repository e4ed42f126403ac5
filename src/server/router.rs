use axum::{extract::DefaultBodyLimit, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        admin::{self, ADMIN_TAG},
        auth::{self, AUTH_TAG},
        billing::{self, BILLING_TAG},
        coaching::{self, COACHING_TAG},
        health::{self, HEALTH_TAG},
        points::{self, POINTS_TAG},
        quiz::{self, QUIZ_TAG},
        user::{self, USER_TAG},
        vocabulary::{self, VOCABULARY_TAG},
        writing::{self, WRITING_TAG},
    },
    service::upload::MAX_IMAGE_BYTES,
    state::AppState,
};

/// Request body limit; leaves room for multipart framing around a maximum size image.
const BODY_LIMIT: usize = MAX_IMAGE_BYTES + 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "Lexicoach API", description = "English learning backend"),
    tags(
        (name = HEALTH_TAG, description = "Liveness"),
        (name = AUTH_TAG, description = "Login through the identity provider"),
        (name = USER_TAG, description = "Profile and avatar"),
        (name = POINTS_TAG, description = "Point balance and ledger"),
        (name = COACHING_TAG, description = "AI tutor conversations"),
        (name = VOCABULARY_TAG, description = "Vocabulary notebook with spaced repetition"),
        (name = QUIZ_TAG, description = "Vocabulary quizzes"),
        (name = WRITING_TAG, description = "AI writing correction"),
        (name = BILLING_TAG, description = "Stripe subscriptions"),
        (name = ADMIN_TAG, description = "Account administration"),
    )
)]
struct ApiDoc;

/// Builds the API router with Swagger UI served at `/api/docs`.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health::health))
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_user))
        .routes(routes!(user::get_profile, user::update_profile))
        .routes(routes!(user::upload_avatar))
        .routes(routes!(points::get_balance))
        .routes(routes!(points::get_history))
        .routes(routes!(coaching::create_session, coaching::list_sessions))
        .routes(routes!(coaching::get_session, coaching::delete_session))
        .routes(routes!(coaching::send_message))
        .routes(routes!(vocabulary::create_word, vocabulary::list_words))
        .routes(routes!(vocabulary::due_words))
        .routes(routes!(vocabulary::update_word, vocabulary::delete_word))
        .routes(routes!(vocabulary::generate_example))
        .routes(routes!(quiz::get_quiz))
        .routes(routes!(quiz::submit_quiz))
        .routes(routes!(quiz::get_history))
        .routes(routes!(writing::submit_writing, writing::list_submissions))
        .routes(routes!(writing::get_submission))
        .routes(routes!(billing::checkout))
        .routes(routes!(billing::portal))
        .routes(routes!(billing::get_subscription))
        .routes(routes!(billing::webhook))
        .routes(routes!(admin::list_users))
        .routes(routes!(admin::grant_points))
        .routes(routes!(admin::set_plan))
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}
