//! Stripe REST client and webhook signature verification.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::server::{
    error::{billing::BillingError, integration::IntegrationError, AppError},
    model::{billing::StripeEvent, points::Plan},
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age in seconds of a webhook timestamp.
pub const WEBHOOK_TOLERANCE_SECS: i64 = 300;

/// Configuration needed to talk to Stripe.
#[derive(Clone)]
pub struct StripeSettings {
    pub secret_key: String,
    pub webhook_secret: String,
    pub price_standard: String,
    pub price_premium: String,
    pub api_base_url: String,
}

#[derive(Clone)]
pub struct StripeClient {
    http_client: reqwest::Client,
    settings: StripeSettings,
}

#[derive(Deserialize)]
struct UrlResponse {
    url: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Parameters for starting a subscription checkout.
pub struct CheckoutRequest<'a> {
    pub user_id: i32,
    pub email: &'a str,
    pub customer_id: Option<&'a str>,
    pub plan: Plan,
    pub success_url: String,
    pub cancel_url: String,
}

impl StripeClient {
    pub fn new(http_client: reqwest::Client, settings: StripeSettings) -> Self {
        Self {
            http_client,
            settings,
        }
    }

    fn price_for(&self, plan: Plan) -> Result<&str, BillingError> {
        match plan {
            Plan::Standard => Ok(&self.settings.price_standard),
            Plan::Premium => Ok(&self.settings.price_premium),
            Plan::Free => Err(BillingError::PlanNotPurchasable(plan.as_str().to_string())),
        }
    }

    /// Creates a Checkout Session in subscription mode and returns its URL.
    pub async fn create_checkout_session(
        &self,
        request: CheckoutRequest<'_>,
    ) -> Result<String, AppError> {
        let price = self.price_for(request.plan)?;
        let user_id = request.user_id.to_string();

        let mut form: Vec<(&str, &str)> = vec![
            ("mode", "subscription"),
            ("line_items[0][price]", price),
            ("line_items[0][quantity]", "1"),
            ("client_reference_id", user_id.as_str()),
            ("metadata[plan]", request.plan.as_str()),
            ("subscription_data[metadata][plan]", request.plan.as_str()),
            ("success_url", request.success_url.as_str()),
            ("cancel_url", request.cancel_url.as_str()),
        ];

        match request.customer_id {
            Some(customer) => form.push(("customer", customer)),
            None => form.push(("customer_email", request.email)),
        }

        self.post_for_url("checkout/sessions", &form).await
    }

    /// Creates a billing portal session for an existing customer.
    pub async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<String, AppError> {
        self.post_for_url(
            "billing_portal/sessions",
            &[("customer", customer_id), ("return_url", return_url)],
        )
        .await
    }

    async fn post_for_url(&self, path: &str, form: &[(&str, &str)]) -> Result<String, AppError> {
        let response = self
            .http_client
            .post(format!(
                "{}/{}",
                self.settings.api_base_url.trim_end_matches('/'),
                path
            ))
            .bearer_auth(&self.settings.secret_key)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| "unreadable error body".to_string());

            return Err(IntegrationError::Stripe {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body: UrlResponse = response.json().await?;
        Ok(body.url)
    }

    /// Verifies a webhook delivery and parses its event envelope.
    pub fn construct_event(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
        now_unix: i64,
    ) -> Result<StripeEvent, AppError> {
        let header = signature_header.ok_or(BillingError::MissingSignature)?;
        verify_signature(&self.settings.webhook_secret, payload, header, now_unix)?;

        Ok(serde_json::from_slice(payload)?)
    }
}

/// Checks a `Stripe-Signature` header of the form `t=<unix>,v1=<hex>[,v1=<hex>...]`.
///
/// The signed payload is `"<t>.<body>"` keyed with the endpoint secret. Any matching
/// `v1` entry is accepted, as long as `t` lies within [`WEBHOOK_TOLERANCE_SECS`] of `now_unix`.
pub fn verify_signature(
    secret: &str,
    payload: &[u8],
    header: &str,
    now_unix: i64,
) -> Result<(), BillingError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp
        .ok_or_else(|| BillingError::InvalidSignature("missing timestamp".to_string()))?;
    let signed_at: i64 = timestamp
        .parse()
        .map_err(|_| BillingError::InvalidSignature("malformed timestamp".to_string()))?;

    if now_unix.abs_diff(signed_at) > WEBHOOK_TOLERANCE_SECS.unsigned_abs() {
        return Err(BillingError::InvalidSignature(
            "timestamp outside tolerance".to_string(),
        ));
    }

    if signatures.is_empty() {
        return Err(BillingError::InvalidSignature("no v1 signature".to_string()));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| BillingError::InvalidSignature(e.to_string()))?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    let matched = signatures.iter().any(|signature| {
        hex::decode(signature)
            .map(|bytes| mac.clone().verify_slice(&bytes).is_ok())
            .unwrap_or(false)
    });

    if matched {
        Ok(())
    } else {
        Err(BillingError::InvalidSignature(
            "no matching signature".to_string(),
        ))
    }
}

/// Builds a header value for `payload` signed at `timestamp`.
#[cfg(test)]
pub fn sign_payload(secret: &str, payload: &[u8], timestamp: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}.", timestamp).as_bytes());
    mac.update(payload);
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}
