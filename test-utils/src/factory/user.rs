//! User factory for creating test user entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// ```rust,ignore
/// let user = UserFactory::new(&db)
///     .email("admin@example.com")
///     .admin(true)
///     .points(3)
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    subject: String,
    email: String,
    display_name: String,
    level: String,
    admin: bool,
    plan: String,
    points: i32,
    points_reset_at: DateTime<Utc>,
    stripe_customer_id: Option<String>,
    stripe_subscription_id: Option<String>,
    subscription_status: Option<String>,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - subject: `"subject-{id}"`, email: `"user{id}@example.com"`, name: `"User {id}"`
    /// - level `beginner`, plan `free` with 100 points
    /// - period ending 30 days from now, no billing identifiers
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            subject: format!("subject-{}", id),
            email: format!("user{}@example.com", id),
            display_name: format!("User {}", id),
            level: "beginner".to_string(),
            admin: false,
            plan: "free".to_string(),
            points: 100,
            points_reset_at: Utc::now() + Duration::days(30),
            stripe_customer_id: None,
            stripe_subscription_id: None,
            subscription_status: None,
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    pub fn plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = plan.into();
        self
    }

    pub fn points(mut self, points: i32) -> Self {
        self.points = points;
        self
    }

    pub fn points_reset_at(mut self, points_reset_at: DateTime<Utc>) -> Self {
        self.points_reset_at = points_reset_at;
        self
    }

    /// Sets Stripe customer and subscription ids with an `active` status.
    pub fn subscribed(
        mut self,
        customer_id: impl Into<String>,
        subscription_id: impl Into<String>,
    ) -> Self {
        self.stripe_customer_id = Some(customer_id.into());
        self.stripe_subscription_id = Some(subscription_id.into());
        self.subscription_status = Some("active".to_string());
        self
    }

    /// Builds and inserts the user entity into the database.
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            subject: ActiveValue::Set(self.subject),
            email: ActiveValue::Set(self.email),
            display_name: ActiveValue::Set(self.display_name),
            avatar_url: ActiveValue::Set(None),
            level: ActiveValue::Set(self.level),
            admin: ActiveValue::Set(self.admin),
            plan: ActiveValue::Set(self.plan),
            points: ActiveValue::Set(self.points),
            points_reset_at: ActiveValue::Set(self.points_reset_at),
            stripe_customer_id: ActiveValue::Set(self.stripe_customer_id),
            stripe_subscription_id: ActiveValue::Set(self.stripe_subscription_id),
            subscription_status: ActiveValue::Set(self.subscription_status),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}
