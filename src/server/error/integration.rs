use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures talking to third-party services (AI completion, payments, image hosting).
#[derive(Error, Debug)]
pub enum IntegrationError {
    /// The AI completion provider returned an error or no usable content.
    #[error("Completion provider error: {0}")]
    Completion(String),

    /// Stripe answered with a non-success status.
    #[error("Stripe API returned {status}: {message}")]
    Stripe {
        /// HTTP status returned by Stripe
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// The image host rejected the upload.
    #[error("Image host error: {0}")]
    ImageHost(String),

    /// The identity provider's userinfo endpoint failed.
    #[error("Identity provider error: {0}")]
    Identity(String),

    /// A third-party response could not be interpreted.
    #[error("Malformed response from {service}: {reason}")]
    MalformedResponse {
        /// Which integration produced the response
        service: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

/// Converts integration failures into 502 Bad Gateway responses.
///
/// Upstream details are logged but never returned to the client.
impl IntoResponse for IntegrationError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorDto {
                error: "An external service is unavailable, please try again later.".to_string(),
            }),
        )
            .into_response()
    }
}
