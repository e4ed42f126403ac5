use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PointsError {
    /// The balance does not cover the cost of the requested action.
    ///
    /// Results in a 402 Payment Required response so the client can offer an upgrade.
    #[error("Not enough points: {required} required, {available} available")]
    Insufficient {
        /// Points the action costs
        required: i32,
        /// Points the user currently holds
        available: i32,
    },
}

impl IntoResponse for PointsError {
    fn into_response(self) -> Response {
        (
            StatusCode::PAYMENT_REQUIRED,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
