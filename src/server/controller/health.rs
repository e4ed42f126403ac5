use axum::{http::StatusCode, response::IntoResponse};

pub static HEALTH_TAG: &str = "health";

#[utoipa::path(
    get,
    path = "/api/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Server is up", body = String, content_type = "text/plain")
    ),
)]
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
