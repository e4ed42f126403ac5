use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        billing::{CheckoutDto, RedirectUrlDto, SubscriptionDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::billing::BillingService,
        state::AppState,
    },
};

pub static BILLING_TAG: &str = "billing";

const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

#[utoipa::path(
    post,
    path = "/api/billing/checkout",
    tag = BILLING_TAG,
    request_body = CheckoutDto,
    responses(
        (status = 200, description = "Stripe Checkout URL", body = RedirectUrlDto),
        (status = 400, description = "Unknown or free plan", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 502, description = "Stripe request failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CheckoutDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let url = BillingService::new(&state.db, &state.stripe, &state.app_url)
        .checkout(&user, &payload.plan)
        .await?;

    Ok((StatusCode::OK, Json(RedirectUrlDto { url })))
}

#[utoipa::path(
    post,
    path = "/api/billing/portal",
    tag = BILLING_TAG,
    responses(
        (status = 200, description = "Stripe customer portal URL", body = RedirectUrlDto),
        (status = 400, description = "User has no Stripe customer", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 502, description = "Stripe request failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn portal(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let url = BillingService::new(&state.db, &state.stripe, &state.app_url)
        .portal(&user)
        .await?;

    Ok((StatusCode::OK, Json(RedirectUrlDto { url })))
}

#[utoipa::path(
    get,
    path = "/api/billing/subscription",
    tag = BILLING_TAG,
    responses(
        (status = 200, description = "Current plan and subscription status", body = SubscriptionDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_subscription(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let subscription = BillingService::new(&state.db, &state.stripe, &state.app_url)
        .subscription(&user);

    Ok((StatusCode::OK, Json(subscription.into_dto())))
}

/// Receives Stripe events. Authenticated by the `Stripe-Signature` header only.
#[utoipa::path(
    post,
    path = "/api/billing/webhook",
    tag = BILLING_TAG,
    request_body(content = String, description = "Raw Stripe event JSON", content_type = "application/json"),
    responses(
        (status = 200, description = "Event applied or ignored"),
        (status = 400, description = "Missing or invalid signature", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    BillingService::new(&state.db, &state.stripe, &state.app_url)
        .handle_webhook(&body, signature, Utc::now().timestamp())
        .await?;

    Ok(StatusCode::OK)
}
