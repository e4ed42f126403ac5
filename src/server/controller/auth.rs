use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{
        error::{auth::AuthError, AppError},
        middleware::session::{AuthSession, CsrfSession},
        service::{auth::AuthService, user::UserService},
        state::AppState,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Query parameters of the OAuth2 callback.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// CSRF state that must match the value stored at login.
    pub state: String,
    /// Authorization code to exchange for an access token.
    pub code: String,
}

#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to the identity provider"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.identity,
    );

    let (url, csrf_token) = auth_service.login_url();
    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(CallbackParams),
    responses(
        (status = 307, description = "Logged in, redirect to the application"),
        (status = 400, description = "CSRF state missing or mismatched", body = ErrorDto),
        (status = 502, description = "Identity provider failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    validate_csrf(&session, &params.state).await?;

    let user = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.identity,
    )
    .callback(params.code)
    .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;
    tracing::info!("User {} logged in", user.id);

    Ok(Redirect::temporary(&state.app_url))
}

#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Session cleared, redirect to the application")
    ),
)]
pub async fn logout(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    AuthSession::new(&session).clear().await;

    Redirect::temporary(&state.app_url)
}

#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged-in user", body = UserDto),
        (status = 404, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let not_logged_in = || AppError::NotFound("Not logged in".to_string());

    let user_id = AuthSession::new(&session)
        .get_user_id()
        .await?
        .ok_or_else(not_logged_in)?;

    let user = UserService::new(&state.db)
        .get_user(user_id)
        .await?
        .ok_or_else(not_logged_in)?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    match stored_state {
        Some(state) if state == csrf_state => Ok(()),
        _ => Err(AuthError::CsrfValidationFailed.into()),
    }
}
