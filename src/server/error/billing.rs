use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BillingError {
    /// Webhook request arrived without a `Stripe-Signature` header.
    #[error("Missing Stripe-Signature header")]
    MissingSignature,

    /// Webhook signature header was malformed, stale, or did not match the payload.
    #[error("Invalid webhook signature: {0}")]
    InvalidSignature(String),

    /// The user has never completed a checkout so no billing portal exists.
    #[error("User {0} has no billing account")]
    NoCustomer(i32),

    /// Requested plan cannot be purchased.
    #[error("Plan '{0}' cannot be purchased")]
    PlanNotPurchasable(String),
}

/// Converts billing errors into 400 Bad Request responses.
///
/// Signature failures are logged at warn level since they may indicate a forged request.
impl IntoResponse for BillingError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::MissingSignature | Self::InvalidSignature(_) => {
                tracing::warn!("Rejected billing webhook: {}", self);
                "Invalid webhook signature".to_string()
            }
            Self::NoCustomer(_) => "No billing account found for this user".to_string(),
            Self::PlanNotPurchasable(plan) => format!("Plan '{}' cannot be purchased", plan),
        };

        (StatusCode::BAD_REQUEST, Json(ErrorDto { error: message })).into_response()
    }
}
