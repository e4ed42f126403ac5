//! Profile image upload.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    integration::image_host::{ImageHostClient, ImageUpload},
    model::user::User,
};

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/webp", "image/gif"];

/// Checks the declared type and size of an uploaded image.
///
/// # Returns
/// - `Ok(())` - Acceptable image
/// - `Err(AppError::BadRequest)` - Empty, too large, or not png/jpeg/webp/gif
pub fn validate_image(content_type: Option<&str>, len: usize) -> Result<(), AppError> {
    let content_type = content_type.unwrap_or_default();
    if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
        return Err(AppError::BadRequest(format!(
            "Unsupported image type '{}', expected png, jpeg, webp or gif",
            content_type
        )));
    }

    if len == 0 {
        return Err(AppError::BadRequest("Image is empty".to_string()));
    }

    if len > MAX_IMAGE_BYTES {
        return Err(AppError::BadRequest(
            "Image must be at most 5 MiB".to_string(),
        ));
    }

    Ok(())
}

pub struct UploadService<'a> {
    db: &'a DatabaseConnection,
    image_host: &'a ImageHostClient,
}

impl<'a> UploadService<'a> {
    pub fn new(db: &'a DatabaseConnection, image_host: &'a ImageHostClient) -> Self {
        Self { db, image_host }
    }

    /// Validates, uploads and stores a new profile image.
    ///
    /// # Returns
    /// - `Ok(User)` - Profile with the new avatar URL
    /// - `Err(AppError::BadRequest)` - Image rejected by [`validate_image`]
    /// - `Err(AppError::IntegrationErr)` - Image host rejected the upload
    pub async fn upload_avatar(&self, user_id: i32, image: ImageUpload) -> Result<User, AppError> {
        validate_image(Some(&image.content_type), image.bytes.len())?;

        let url = self.image_host.upload_avatar(user_id, image).await?;

        UserRepository::new(self.db)
            .set_avatar(user_id, &url)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
