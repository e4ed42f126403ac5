use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        points::{PointTransactionDto, PointsBalanceDto},
    },
    server::{
        controller::param::PaginationParam, error::AppError, middleware::auth::AuthGuard,
        service::points::PointsService, state::AppState,
    },
};

pub static POINTS_TAG: &str = "points";

#[utoipa::path(
    get,
    path = "/api/points",
    tag = POINTS_TAG,
    responses(
        (status = 200, description = "Current balance and plan allowance", body = PointsBalanceDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_balance(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let balance = PointsService::new(&state.db).balance(user.id).await?;

    Ok((StatusCode::OK, Json(balance.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/points/history",
    tag = POINTS_TAG,
    params(PaginationParam),
    responses(
        (status = 200, description = "Point ledger, newest first", body = PaginatedDto<PointTransactionDto>),
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

    let history = PointsService::new(&state.db)
        .history(user.id, pagination.into_page())
        .await?;

    Ok((StatusCode::OK, Json(history.into_dto(|entry| entry.into_dto()))))
}
