use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        writing::{SubmitWritingDto, WritingReviewDto, WritingSubmissionDto},
    },
    server::{
        controller::param::PaginationParam, error::AppError, middleware::auth::AuthGuard,
        model::writing::SubmitWritingParam, service::writing::WritingService, state::AppState,
    },
};

pub static WRITING_TAG: &str = "writing";

#[utoipa::path(
    post,
    path = "/api/writing",
    tag = WRITING_TAG,
    request_body = SubmitWritingDto,
    responses(
        (status = 201, description = "Corrected submission and remaining points", body = WritingReviewDto),
        (status = 400, description = "Text too short or too long", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 402, description = "Not enough points", body = ErrorDto),
        (status = 502, description = "AI provider failed, points refunded", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_writing(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SubmitWritingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let param = SubmitWritingParam::from_dto(payload)?;

    let result = WritingService::new(&state.db, state.completion.as_ref())
        .submit(&user, param)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WritingReviewDto {
            submission: result.submission.into_dto(),
            points_remaining: result.points_remaining,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/writing",
    tag = WRITING_TAG,
    params(PaginationParam),
    responses(
        (status = 200, description = "Submissions, newest first", body = PaginatedDto<WritingSubmissionDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_submissions(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let submissions = WritingService::new(&state.db, state.completion.as_ref())
        .list(user.id, pagination.into_page())
        .await?;

    Ok((StatusCode::OK, Json(submissions.into_dto(|s| s.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/writing/{id}",
    tag = WRITING_TAG,
    params(
        ("id" = i32, Path, description = "Writing submission ID")
    ),
    responses(
        (status = 200, description = "Submission", body = WritingSubmissionDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Submission not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_submission(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let submission = WritingService::new(&state.db, state.completion.as_ref())
        .get(user.id, id)
        .await?;

    Ok((StatusCode::OK, Json(submission.into_dto())))
}
