//! Signed uploads to Cloudinary.

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::server::error::{integration::IntegrationError, AppError};

/// Folder profile images are stored under.
const AVATAR_FOLDER: &str = "avatars";

/// Configuration needed to upload to Cloudinary.
#[derive(Clone)]
pub struct ImageHostSettings {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base_url: String,
}

#[derive(Clone)]
pub struct ImageHostClient {
    http_client: reqwest::Client,
    settings: ImageHostSettings,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// A validated image ready to upload.
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

impl ImageHostClient {
    pub fn new(http_client: reqwest::Client, settings: ImageHostSettings) -> Self {
        Self {
            http_client,
            settings,
        }
    }

    /// Uploads a user's profile image, replacing any previous one.
    ///
    /// # Returns
    /// - `Ok(String)` - HTTPS URL of the stored image
    /// - `Err(AppError::IntegrationErr)` - Cloudinary rejected the upload
    pub async fn upload_avatar(&self, user_id: i32, image: ImageUpload) -> Result<String, AppError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let public_id = format!("user-{}", user_id);

        let params = [
            ("folder", AVATAR_FOLDER),
            ("overwrite", "true"),
            ("public_id", public_id.as_str()),
            ("timestamp", timestamp.as_str()),
        ];
        let signature = sign_params(&params, &self.settings.api_secret);

        let file = reqwest::multipart::Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("api_key", self.settings.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key, value.to_string());
        }

        let response = self
            .http_client
            .post(format!(
                "{}/{}/image/upload",
                self.settings.api_base_url.trim_end_matches('/'),
                self.settings.cloud_name
            ))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::ImageHost(format!("{} returned {}", status, body)).into());
        }

        let uploaded: UploadResponse = response.json().await?;
        tracing::info!("Uploaded avatar for user {} to {}", user_id, uploaded.secure_url);

        Ok(uploaded.secure_url)
    }
}

/// Computes the request signature: SHA-256 hex of the alphabetically sorted
/// `key=value` pairs joined with `&`, followed by the API secret.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
