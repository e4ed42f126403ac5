//! Stripe subscriptions: checkout, customer portal and webhook handling.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{billing::BillingError, AppError},
    integration::stripe::{CheckoutRequest, StripeClient},
    model::{
        billing::{
            status_ends_subscription, BillingEvent, CheckoutSessionCompleted, SetBillingParam,
            Subscription, SubscriptionObject,
        },
        points::{Plan, PointReason},
        user::User,
    },
    service::points::PointsService,
};

pub struct BillingService<'a> {
    db: &'a DatabaseConnection,
    stripe: &'a StripeClient,
    app_url: &'a str,
}

impl<'a> BillingService<'a> {
    pub fn new(db: &'a DatabaseConnection, stripe: &'a StripeClient, app_url: &'a str) -> Self {
        Self {
            db,
            stripe,
            app_url,
        }
    }

    fn app_link(&self, path: &str) -> String {
        format!("{}{}", self.app_url.trim_end_matches('/'), path)
    }

    /// Starts a subscription checkout for `plan`.
    ///
    /// # Returns
    /// - `Ok(String)` - Checkout page URL
    /// - `Err(AppError::BadRequest)` - Unknown plan name
    /// - `Err(AppError::BillingErr(PlanNotPurchasable))` - The free plan
    pub async fn checkout(&self, user: &User, plan: &str) -> Result<String, AppError> {
        let plan = Plan::parse(plan)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown plan '{}'", plan)))?;
        if plan == Plan::Free {
            return Err(BillingError::PlanNotPurchasable(plan.as_str().to_string()).into());
        }

        let url = self
            .stripe
            .create_checkout_session(CheckoutRequest {
                user_id: user.id,
                email: &user.email,
                customer_id: user.stripe_customer_id.as_deref(),
                plan,
                success_url: self.app_link("/billing?status=success"),
                cancel_url: self.app_link("/billing?status=cancel"),
            })
            .await?;

        tracing::debug!("Started {} checkout for user {}", plan.as_str(), user.id);

        Ok(url)
    }

    /// Opens the Stripe customer portal.
    ///
    /// # Returns
    /// - `Err(AppError::BillingErr(NoCustomer))` - User never completed a checkout
    pub async fn portal(&self, user: &User) -> Result<String, AppError> {
        let customer_id = user
            .stripe_customer_id
            .as_deref()
            .ok_or(BillingError::NoCustomer(user.id))?;

        self.stripe
            .create_portal_session(customer_id, &self.app_link("/billing"))
            .await
    }

    pub fn subscription(&self, user: &User) -> Subscription {
        Subscription {
            plan: user.plan,
            status: user.subscription_status.clone(),
            customer_id: user.stripe_customer_id.clone(),
        }
    }

    /// Verifies and applies a webhook delivery.
    ///
    /// Events that reference unknown users are logged and acknowledged so Stripe
    /// does not retry them.
    ///
    /// # Returns
    /// - `Ok(())` - Event applied or ignored
    /// - `Err(AppError::BillingErr)` - Missing or invalid signature
    /// - `Err(AppError::JsonErr)` - Signed payload is not a Stripe event
    pub async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
        now_unix: i64,
    ) -> Result<(), AppError> {
        let event = self.stripe.construct_event(payload, signature, now_unix)?;
        let event_id = event.id.clone();

        match BillingEvent::from_stripe(event)? {
            BillingEvent::CheckoutCompleted(session) => self.checkout_completed(session).await,
            BillingEvent::SubscriptionUpdated(subscription) => {
                self.subscription_updated(subscription).await
            }
            BillingEvent::SubscriptionDeleted(subscription) => {
                self.subscription_deleted(subscription).await
            }
            BillingEvent::Ignored(event_type) => {
                tracing::debug!("Ignoring Stripe event {} ({})", event_id, event_type);
                Ok(())
            }
        }
    }

    async fn checkout_completed(&self, session: CheckoutSessionCompleted) -> Result<(), AppError> {
        let Some(user_id) = session
            .client_reference_id
            .as_deref()
            .and_then(|id| id.parse::<i32>().ok())
        else {
            tracing::warn!("Checkout completed without a usable client_reference_id");
            return Ok(());
        };

        let plan = session
            .metadata
            .get("plan")
            .and_then(|plan| Plan::parse(plan))
            .filter(|plan| *plan != Plan::Free);
        let Some(plan) = plan else {
            tracing::warn!("Checkout for user {} carries no paid plan", user_id);
            return Ok(());
        };

        let repo = UserRepository::new(self.db);
        let Some(current) = repo.find_by_id(user_id).await? else {
            tracing::warn!("Checkout completed for unknown user {}", user_id);
            return Ok(());
        };

        // Stripe redelivers events; the first delivery already stored this subscription.
        if session.subscription.is_some()
            && current.stripe_subscription_id == session.subscription
        {
            tracing::debug!(
                "Checkout for subscription {:?} already applied to user {}",
                session.subscription,
                user_id
            );
            return Ok(());
        }

        let updated = repo
            .set_billing(
                user_id,
                SetBillingParam {
                    plan,
                    customer_id: session.customer,
                    subscription_id: session.subscription,
                    status: Some("active".to_string()),
                },
            )
            .await?;

        if updated.is_none() {
            tracing::warn!("Checkout completed for unknown user {}", user_id);
            return Ok(());
        }

        PointsService::new(self.db)
            .apply_plan(user_id, plan, PointReason::Subscription)
            .await?;

        tracing::info!("User {} subscribed to {}", user_id, plan.as_str());

        Ok(())
    }

    async fn subscription_updated(&self, subscription: SubscriptionObject) -> Result<(), AppError> {
        let Some(user) = self.subscriber(&subscription.id).await? else {
            return Ok(());
        };

        let plan = if status_ends_subscription(&subscription.status) {
            tracing::info!(
                "Subscription {} is {}, downgrading user {}",
                subscription.id,
                subscription.status,
                user.id
            );
            Plan::Free
        } else {
            user.plan
        };

        UserRepository::new(self.db)
            .set_billing(
                user.id,
                SetBillingParam {
                    plan,
                    customer_id: user.stripe_customer_id,
                    subscription_id: user.stripe_subscription_id,
                    status: Some(subscription.status),
                },
            )
            .await?;

        Ok(())
    }

    async fn subscription_deleted(&self, subscription: SubscriptionObject) -> Result<(), AppError> {
        let Some(user) = self.subscriber(&subscription.id).await? else {
            return Ok(());
        };

        UserRepository::new(self.db)
            .set_billing(
                user.id,
                SetBillingParam {
                    plan: Plan::Free,
                    customer_id: user.stripe_customer_id,
                    subscription_id: None,
                    status: Some("canceled".to_string()),
                },
            )
            .await?;

        tracing::info!("Subscription {} ended for user {}", subscription.id, user.id);

        Ok(())
    }

    async fn subscriber(&self, subscription_id: &str) -> Result<Option<User>, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_subscription_id(subscription_id)
            .await?;

        if user.is_none() {
            tracing::warn!("No user owns subscription {}", subscription_id);
        }

        Ok(user)
    }
}
