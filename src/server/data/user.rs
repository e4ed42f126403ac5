//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! Besides identity and profile fields it owns the point balance columns, and all
//! balance changes are single conditional `UPDATE ... RETURNING` statements so that
//! concurrent requests cannot overdraw an account.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    error::AppError,
    model::{
        billing::SetBillingParam,
        page::PageParam,
        points::Plan,
        user::{Level, UpdateProfileParam, UpsertUserParam, User},
    },
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new user on the free plan with a full balance.
    ///
    /// # Arguments
    /// - `param` - Identity fields from the identity provider
    /// - `points_reset_at` - End of the user's first point period
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::DbErr)` - Insert failed, e.g. duplicate subject
    pub async fn create(
        &self,
        param: UpsertUserParam,
        points_reset_at: DateTime<Utc>,
    ) -> Result<User, AppError> {
        let plan = Plan::Free;
        let entity = entity::user::ActiveModel {
            subject: ActiveValue::Set(param.subject),
            email: ActiveValue::Set(param.email),
            display_name: ActiveValue::Set(param.display_name),
            avatar_url: ActiveValue::Set(param.avatar_url),
            level: ActiveValue::Set(Level::Beginner.as_str().to_string()),
            admin: ActiveValue::Set(param.grant_admin),
            plan: ActiveValue::Set(plan.as_str().to_string()),
            points: ActiveValue::Set(plan.monthly_allowance()),
            points_reset_at: ActiveValue::Set(points_reset_at),
            stripe_customer_id: ActiveValue::Set(None),
            stripe_subscription_id: ActiveValue::Set(None),
            subscription_status: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Refreshes identity fields of a returning user.
    ///
    /// Admin status is only ever granted here, never revoked, so removing an email
    /// from the admin list does not lock out an existing admin mid-session.
    pub async fn update_identity(
        &self,
        user_id: i32,
        param: UpsertUserParam,
    ) -> Result<Option<User>, AppError> {
        let mut update = entity::prelude::User::update_many()
            .col_expr(entity::user::Column::Email, Expr::value(param.email))
            .col_expr(
                entity::user::Column::DisplayName,
                Expr::value(param.display_name),
            )
            .filter(entity::user::Column::Id.eq(user_id));

        if param.grant_admin {
            update = update.col_expr(entity::user::Column::Admin, Expr::value(true));
        }

        self.first_returned(update).await
    }

    /// Finds a user by primary key.
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, AppError> {
        entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Finds a user by the identity provider's subject identifier.
    pub async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, AppError> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Subject.eq(subject))
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Finds the user owning a Stripe subscription.
    pub async fn find_by_subscription_id(
        &self,
        subscription_id: &str,
    ) -> Result<Option<User>, AppError> {
        entity::prelude::User::find()
            .filter(entity::user::Column::StripeSubscriptionId.eq(subscription_id))
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Subtracts `cost` points if, and only if, the balance covers it.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Debit applied, user carries the new balance
    /// - `Ok(None)` - Balance too low or user missing, nothing changed
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn debit(&self, user_id: i32, cost: i32) -> Result<Option<User>, AppError> {
        let update = entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::Points,
                Expr::col(entity::user::Column::Points).sub(cost),
            )
            .filter(entity::user::Column::Id.eq(user_id))
            .filter(entity::user::Column::Points.gte(cost));

        self.first_returned(update).await
    }

    /// Adds `amount` points to the balance.
    pub async fn credit(&self, user_id: i32, amount: i32) -> Result<Option<User>, AppError> {
        let update = entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::Points,
                Expr::col(entity::user::Column::Points).add(amount),
            )
            .filter(entity::user::Column::Id.eq(user_id));

        self.first_returned(update).await
    }

    /// Refills the balance for a new period if the current one has ended.
    ///
    /// The `points_reset_at <= now` condition is part of the update, so two callers
    /// racing on the same user apply the reset once.
    ///
    /// # Returns
    /// - `Ok(Some((previous_points, User)))` - Reset applied
    /// - `Ok(None)` - Period not over yet (or already reset by another caller)
    pub async fn reset_points_if_due(
        &self,
        user_id: i32,
        points: i32,
        now: DateTime<Utc>,
        next_reset_at: DateTime<Utc>,
    ) -> Result<Option<(i32, User)>, AppError> {
        let update = entity::prelude::User::update_many()
            .col_expr(entity::user::Column::Points, Expr::value(points))
            .col_expr(
                entity::user::Column::PointsResetAt,
                Expr::value(next_reset_at),
            )
            .filter(entity::user::Column::Id.eq(user_id))
            .filter(entity::user::Column::PointsResetAt.lte(now));

        self.overwrite_points(user_id, update).await
    }

    /// Gets every user whose point period ended at or before `now`.
    pub async fn find_due_for_reset(&self, now: DateTime<Utc>) -> Result<Vec<User>, AppError> {
        entity::prelude::User::find()
            .filter(entity::user::Column::PointsResetAt.lte(now))
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect()
    }

    /// Applies a validated profile update, leaving omitted fields unchanged.
    pub async fn update_profile(
        &self,
        user_id: i32,
        param: UpdateProfileParam,
    ) -> Result<Option<User>, AppError> {
        // An UPDATE without SET clauses is invalid SQL.
        if param.display_name.is_none() && param.level.is_none() {
            return self.find_by_id(user_id).await;
        }

        let mut update =
            entity::prelude::User::update_many().filter(entity::user::Column::Id.eq(user_id));

        if let Some(display_name) = param.display_name {
            update = update.col_expr(entity::user::Column::DisplayName, Expr::value(display_name));
        }
        if let Some(level) = param.level {
            update = update.col_expr(entity::user::Column::Level, Expr::value(level.as_str()));
        }

        self.first_returned(update).await
    }

    pub async fn set_avatar(&self, user_id: i32, url: &str) -> Result<Option<User>, AppError> {
        let update = entity::prelude::User::update_many()
            .col_expr(entity::user::Column::AvatarUrl, Expr::value(url))
            .filter(entity::user::Column::Id.eq(user_id));

        self.first_returned(update).await
    }

    /// Sets the plan and refills the balance to `points`.
    ///
    /// # Returns
    /// - `Ok(Some((previous_points, User)))` - Plan applied
    /// - `Ok(None)` - User does not exist
    pub async fn set_plan(
        &self,
        user_id: i32,
        plan: Plan,
        points: i32,
    ) -> Result<Option<(i32, User)>, AppError> {
        let update = entity::prelude::User::update_many()
            .col_expr(entity::user::Column::Plan, Expr::value(plan.as_str()))
            .col_expr(entity::user::Column::Points, Expr::value(points))
            .filter(entity::user::Column::Id.eq(user_id));

        self.overwrite_points(user_id, update).await
    }

    /// Overwrites plan and Stripe identifiers without touching the balance.
    pub async fn set_billing(
        &self,
        user_id: i32,
        param: SetBillingParam,
    ) -> Result<Option<User>, AppError> {
        let update = entity::prelude::User::update_many()
            .col_expr(entity::user::Column::Plan, Expr::value(param.plan.as_str()))
            .col_expr(
                entity::user::Column::StripeCustomerId,
                Expr::value(param.customer_id),
            )
            .col_expr(
                entity::user::Column::StripeSubscriptionId,
                Expr::value(param.subscription_id),
            )
            .col_expr(
                entity::user::Column::SubscriptionStatus,
                Expr::value(param.status),
            )
            .filter(entity::user::Column::Id.eq(user_id));

        self.first_returned(update).await
    }

    /// Gets all users with pagination, ordered by id.
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the requested page and total user count
    /// - `Err(AppError)` - Database error or unreadable stored value
    pub async fn get_all_paginated(&self, param: PageParam) -> Result<(Vec<User>, u64), AppError> {
        let paginator = entity::prelude::User::find()
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, param.per_page);

        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(param.page)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, total))
    }

    /// Runs a balance overwrite and returns the balance it replaced.
    ///
    /// The read and the update share one transaction, so the previous balance is the
    /// one the update actually overwrote.
    async fn overwrite_points(
        &self,
        user_id: i32,
        update: sea_orm::UpdateMany<entity::prelude::User>,
    ) -> Result<Option<(i32, User)>, AppError> {
        let txn = self.db.begin().await?;

        let Some(previous) = entity::prelude::User::find_by_id(user_id).one(&txn).await? else {
            return Ok(None);
        };
        let updated = update.exec_with_returning(&txn).await?.into_iter().next();

        txn.commit().await?;

        updated
            .map(|entity| Ok((previous.points, User::from_entity(entity)?)))
            .transpose()
    }

    async fn first_returned(
        &self,
        update: sea_orm::UpdateMany<entity::prelude::User>,
    ) -> Result<Option<User>, AppError> {
        update
            .exec_with_returning(self.db)
            .await?
            .into_iter()
            .next()
            .map(User::from_entity)
            .transpose()
    }
}
