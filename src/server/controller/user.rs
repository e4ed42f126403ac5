use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{UpdateProfileDto, UserDto},
    },
    server::{
        error::AppError,
        integration::image_host::ImageUpload,
        middleware::auth::AuthGuard,
        model::user::UpdateProfileParam,
        service::{upload::UploadService, user::UserService},
        state::AppState,
    },
};

pub static USER_TAG: &str = "user";

/// Multipart field carrying the profile image.
const AVATAR_FIELD: &str = "image";

#[utoipa::path(
    get,
    path = "/api/user/profile",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current user's profile", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

#[utoipa::path(
    patch,
    path = "/api/user/profile",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = UserDto),
        (status = 400, description = "Invalid display name or level", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let param = UpdateProfileParam::from_dto(payload)?;

    let user = UserService::new(&state.db)
        .update_profile(user.id, param)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Uploads a profile image from the multipart field `image`.
#[utoipa::path(
    post,
    path = "/api/user/avatar",
    tag = USER_TAG,
    request_body(content_type = "multipart/form-data", description = "Field `image`: png, jpeg, webp or gif up to 5 MiB"),
    responses(
        (status = 200, description = "Profile with the new avatar", body = UserDto),
        (status = 400, description = "Missing, empty, oversized or unsupported image", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 502, description = "Image host failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_avatar(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let mut image = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or("avatar").to_string();
        let bytes = field.bytes().await?.to_vec();

        image = Some(ImageUpload {
            bytes,
            content_type,
            file_name,
        });
        break;
    }

    let image = image.ok_or_else(|| {
        AppError::BadRequest(format!("Missing multipart field '{}'", AVATAR_FIELD))
    })?;

    let user = UploadService::new(&state.db, &state.image_host)
        .upload_avatar(user.id, image)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
