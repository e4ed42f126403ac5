//! Billing domain models: subscription state and parsed Stripe webhook events.

use serde::Deserialize;

use crate::{model::billing::SubscriptionDto, server::model::points::Plan};

/// Subscription summary for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub plan: Plan,
    pub status: Option<String>,
    pub customer_id: Option<String>,
}

impl Subscription {
    pub fn into_dto(self) -> SubscriptionDto {
        SubscriptionDto {
            plan: self.plan.as_str().to_string(),
            status: self.status,
            customer_id: self.customer_id,
        }
    }
}

/// Full billing state written back to a user row.
///
/// `None` clears the corresponding column.
#[derive(Debug, Clone, PartialEq)]
pub struct SetBillingParam {
    pub plan: Plan,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub status: Option<String>,
}

/// Envelope of a Stripe webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

/// Fields of a completed Checkout Session the application cares about.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CheckoutSessionCompleted {
    pub client_reference_id: Option<String>,
    pub customer: Option<String>,
    pub subscription: Option<String>,
    #[serde(default)]
    pub metadata: std::collections::HashMap<String, String>,
}

/// Fields of a subscription object sent with `customer.subscription.*` events.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SubscriptionObject {
    pub id: String,
    pub status: String,
}

/// A webhook event narrowed to the kinds the application acts upon.
#[derive(Debug, Clone, PartialEq)]
pub enum BillingEvent {
    CheckoutCompleted(CheckoutSessionCompleted),
    SubscriptionUpdated(SubscriptionObject),
    SubscriptionDeleted(SubscriptionObject),
    Ignored(String),
}

impl BillingEvent {
    pub fn from_stripe(event: StripeEvent) -> Result<Self, serde_json::Error> {
        Ok(match event.event_type.as_str() {
            "checkout.session.completed" => {
                Self::CheckoutCompleted(serde_json::from_value(event.data.object)?)
            }
            "customer.subscription.updated" => {
                Self::SubscriptionUpdated(serde_json::from_value(event.data.object)?)
            }
            "customer.subscription.deleted" => {
                Self::SubscriptionDeleted(serde_json::from_value(event.data.object)?)
            }
            _ => Self::Ignored(event.event_type),
        })
    }
}

/// Subscription statuses after which the user loses paid benefits.
pub fn status_ends_subscription(status: &str) -> bool {
    matches!(status, "canceled" | "unpaid" | "incomplete_expired")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(event_type: &str, object: serde_json::Value) -> StripeEvent {
        serde_json::from_value(serde_json::json!({
            "id": "evt_1",
            "type": event_type,
            "data": { "object": object }
        }))
        .unwrap()
    }

    #[test]
    fn narrows_checkout_completed() {
        let parsed = BillingEvent::from_stripe(event(
            "checkout.session.completed",
            serde_json::json!({
                "client_reference_id": "42",
                "customer": "cus_1",
                "subscription": "sub_1",
                "metadata": { "plan": "premium" }
            }),
        ))
        .unwrap();

        match parsed {
            BillingEvent::CheckoutCompleted(session) => {
                assert_eq!(session.client_reference_id.as_deref(), Some("42"));
                assert_eq!(session.metadata.get("plan").map(String::as_str), Some("premium"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn unknown_event_is_ignored() {
        let parsed =
            BillingEvent::from_stripe(event("invoice.paid", serde_json::json!({}))).unwrap();
        assert_eq!(parsed, BillingEvent::Ignored("invoice.paid".to_string()));
    }

    #[test]
    fn canceled_and_unpaid_end_subscription() {
        assert!(status_ends_subscription("canceled"));
        assert!(status_ends_subscription("unpaid"));
        assert!(!status_ends_subscription("active"));
        assert!(!status_ends_subscription("past_due"));
    }
}
