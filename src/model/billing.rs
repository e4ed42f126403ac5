use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CheckoutDto {
    /// `standard` or `premium`.
    pub plan: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct RedirectUrlDto {
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct SubscriptionDto {
    pub plan: String,
    pub status: Option<String>,
    pub customer_id: Option<String>,
}
