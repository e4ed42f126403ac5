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
        points::{GrantPointsDto, SetPlanDto},
        user::UserDto,
    },
    server::{
        controller::param::PaginationParam,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::{admin::AdminService, user::UserService},
        state::AppState,
    },
};

pub static ADMIN_TAG: &str = "admin";

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(PaginationParam),
    responses(
        (status = 200, description = "Users ordered by id", body = PaginatedDto<UserDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let users = AdminService::new(&state.db)
        .list_users(pagination.into_page())
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto(|user| user.into_dto()))))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/points",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = GrantPointsDto,
    responses(
        (status = 200, description = "User with the credited balance", body = UserDto),
        (status = 400, description = "Amount outside 1..=100000", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn grant_points(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<GrantPointsDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    AdminService::new(&state.db)
        .grant_points(id, payload.amount, payload.reason)
        .await?;

    tracing::info!("Admin {} granted {} points to user {}", admin.id, payload.amount, id);

    let user = UserService::new(&state.db)
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/plan",
    tag = ADMIN_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = SetPlanDto,
    responses(
        (status = 200, description = "User on the new plan with a refilled balance", body = UserDto),
        (status = 400, description = "Unknown plan", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_plan(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<SetPlanDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = AdminService::new(&state.db)
        .set_plan(id, &payload.plan)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
