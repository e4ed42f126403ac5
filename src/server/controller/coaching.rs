use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        coaching::{
            CoachingReplyDto, CoachingSessionDetailDto, CoachingSessionDto,
            CreateCoachingSessionDto, SendCoachingMessageDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::coaching::{CreateSessionParam, SendMessageParam},
        service::coaching::CoachingService,
        state::AppState,
    },
};

pub static COACHING_TAG: &str = "coaching";

#[utoipa::path(
    post,
    path = "/api/coaching/sessions",
    tag = COACHING_TAG,
    request_body = CreateCoachingSessionDto,
    responses(
        (status = 201, description = "Session created", body = CoachingSessionDto),
        (status = 400, description = "Topic too long", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_session(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCoachingSessionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let param = CreateSessionParam::from_dto(payload)?;

    let coaching_session = CoachingService::new(&state.db, state.completion.as_ref())
        .create_session(user.id, param)
        .await?;

    Ok((StatusCode::CREATED, Json(coaching_session.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/coaching/sessions",
    tag = COACHING_TAG,
    responses(
        (status = 200, description = "Sessions, most recently active first", body = Vec<CoachingSessionDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let sessions = CoachingService::new(&state.db, state.completion.as_ref())
        .list_sessions(user.id)
        .await?;

    let dto: Vec<_> = sessions.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

#[utoipa::path(
    get,
    path = "/api/coaching/sessions/{id}",
    tag = COACHING_TAG,
    params(
        ("id" = i32, Path, description = "Coaching session ID")
    ),
    responses(
        (status = 200, description = "Session with its messages in order", body = CoachingSessionDetailDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_session(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let detail = CoachingService::new(&state.db, state.completion.as_ref())
        .get_session(user.id, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(CoachingSessionDetailDto {
            session: detail.session.into_dto(),
            messages: detail.messages.into_iter().map(|m| m.into_dto()).collect(),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/coaching/sessions/{id}",
    tag = COACHING_TAG,
    params(
        ("id" = i32, Path, description = "Coaching session ID")
    ),
    responses(
        (status = 204, description = "Session and messages deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_session(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    CoachingService::new(&state.db, state.completion.as_ref())
        .delete_session(user.id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/coaching/sessions/{id}/messages",
    tag = COACHING_TAG,
    params(
        ("id" = i32, Path, description = "Coaching session ID")
    ),
    request_body = SendCoachingMessageDto,
    responses(
        (status = 200, description = "Tutor reply and remaining points", body = CoachingReplyDto),
        (status = 400, description = "Empty or overlong message", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 402, description = "Not enough points", body = ErrorDto),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 502, description = "AI provider failed, points refunded", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_message(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<SendCoachingMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let param = SendMessageParam::from_dto(payload)?;

    let reply = CoachingService::new(&state.db, state.completion.as_ref())
        .send_message(&user, id, param)
        .await?;

    Ok((
        StatusCode::OK,
        Json(CoachingReplyDto {
            reply: reply.reply.into_dto(),
            points_remaining: reply.points_remaining,
        }),
    ))
}
