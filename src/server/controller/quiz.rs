use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        quiz::{QuizAttemptDto, QuizDto, QuizResultDto, SubmitQuizDto},
    },
    server::{
        controller::param::PaginationParam, error::AppError, middleware::auth::AuthGuard,
        model::quiz::QuizAnswerParam, service::quiz::QuizService, state::AppState,
    },
};

pub static QUIZ_TAG: &str = "quiz";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuizParam {
    /// Number of questions (default: 10, 1..=20)
    pub count: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/api/quiz",
    tag = QUIZ_TAG,
    params(QuizParam),
    responses(
        (status = 200, description = "Multiple-choice questions", body = QuizDto),
        (status = 400, description = "Invalid count or not enough words", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_quiz(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<QuizParam>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let questions = QuizService::new(&state.db)
        .generate(user.id, params.count)
        .await?;

    Ok((
        StatusCode::OK,
        Json(QuizDto {
            questions: questions.into_iter().map(|q| q.into_dto()).collect(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/quiz/submit",
    tag = QUIZ_TAG,
    request_body = SubmitQuizDto,
    responses(
        (status = 200, description = "Graded answers and score", body = QuizResultDto),
        (status = 400, description = "No answers submitted", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Unknown word", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_quiz(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SubmitQuizDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let result = QuizService::new(&state.db)
        .submit(user.id, QuizAnswerParam::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(result.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/quiz/history",
    tag = QUIZ_TAG,
    params(PaginationParam),
    responses(
        (status = 200, description = "Quiz attempts, newest first", body = PaginatedDto<QuizAttemptDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_history(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let history = QuizService::new(&state.db)
        .history(user.id, pagination.into_page())
        .await?;

    Ok((StatusCode::OK, Json(history.into_dto(|attempt| attempt.into_dto()))))
}
