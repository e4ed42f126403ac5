use axum::{
    extract::{Path, Query, State},
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
        vocabulary::{CreateWordDto, GeneratedExampleDto, UpdateWordDto, WordDto},
    },
    server::{
        controller::param::PaginationParam,
        error::AppError,
        middleware::auth::AuthGuard,
        model::vocabulary::WordFieldsParam,
        service::vocabulary::VocabularyService,
        state::AppState,
    },
};

pub static VOCABULARY_TAG: &str = "vocabulary";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DueParam {
    /// Maximum number of words (default: 20, max: 100)
    pub limit: Option<u64>,
}

#[utoipa::path(
    post,
    path = "/api/vocabulary",
    tag = VOCABULARY_TAG,
    request_body = CreateWordDto,
    responses(
        (status = 201, description = "Word added", body = WordDto),
        (status = 400, description = "Invalid fields or duplicate term", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_word(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateWordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let param = WordFieldsParam::from_create_dto(payload)?;

    let word = VocabularyService::new(&state.db, state.completion.as_ref())
        .create(user.id, param)
        .await?;

    Ok((StatusCode::CREATED, Json(word.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/vocabulary",
    tag = VOCABULARY_TAG,
    params(PaginationParam),
    responses(
        (status = 200, description = "Words in alphabetical order", body = PaginatedDto<WordDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_words(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let words = VocabularyService::new(&state.db, state.completion.as_ref())
        .list(user.id, pagination.into_page())
        .await?;

    Ok((StatusCode::OK, Json(words.into_dto(|word| word.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/vocabulary/due",
    tag = VOCABULARY_TAG,
    params(DueParam),
    responses(
        (status = 200, description = "Words due for review, oldest due first", body = Vec<WordDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn due_words(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<DueParam>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let words = VocabularyService::new(&state.db, state.completion.as_ref())
        .due(user.id, params.limit)
        .await?;

    let dto: Vec<_> = words.into_iter().map(|word| word.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

#[utoipa::path(
    put,
    path = "/api/vocabulary/{id}",
    tag = VOCABULARY_TAG,
    params(
        ("id" = i32, Path, description = "Word ID")
    ),
    request_body = UpdateWordDto,
    responses(
        (status = 200, description = "Word updated", body = WordDto),
        (status = 400, description = "Invalid fields or duplicate term", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Word not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_word(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let param = WordFieldsParam::from_update_dto(payload)?;

    let word = VocabularyService::new(&state.db, state.completion.as_ref())
        .update(user.id, id, param)
        .await?;

    Ok((StatusCode::OK, Json(word.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/vocabulary/{id}",
    tag = VOCABULARY_TAG,
    params(
        ("id" = i32, Path, description = "Word ID")
    ),
    responses(
        (status = 204, description = "Word deleted"),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Word not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_word(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    VocabularyService::new(&state.db, state.completion.as_ref())
        .delete(user.id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/vocabulary/{id}/example",
    tag = VOCABULARY_TAG,
    params(
        ("id" = i32, Path, description = "Word ID")
    ),
    responses(
        (status = 200, description = "Word with a new AI example sentence", body = GeneratedExampleDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 402, description = "Not enough points", body = ErrorDto),
        (status = 404, description = "Word not found", body = ErrorDto),
        (status = 502, description = "AI provider failed, points refunded", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn generate_example(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let (word, points_remaining) = VocabularyService::new(&state.db, state.completion.as_ref())
        .generate_example(&user, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(GeneratedExampleDto {
            word: word.into_dto(),
            points_remaining,
        }),
    ))
}
