//! Point metering.
//!
//! Every AI-backed feature goes through [`PointsService::debit`] before calling the
//! model and [`PointsService::refund`] when the call fails. Balances refill to the
//! plan allowance once per UTC calendar month, lazily on access and in bulk from the
//! scheduler.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{point_transaction::PointTransactionRepository, user::UserRepository},
    error::{points::PointsError, AppError},
    model::{
        page::{PageParam, Paginated},
        points::{GrantPointsParam, Plan, PointReason, PointTransaction, PointsBalance},
        user::User,
    },
    util::time::start_of_next_month,
};

/// Largest amount an admin can grant in one request.
pub const MAX_GRANT: i32 = 100_000;

pub struct PointsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PointsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn require_user(&self, user_id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Refills the balance if the user's period is over.
    ///
    /// # Returns
    /// - `Ok(User)` - The user with an up-to-date balance (unchanged if not due)
    pub async fn reset_if_due(&self, user: User, now: DateTime<Utc>) -> Result<User, AppError> {
        if now < user.points_reset_at {
            return Ok(user);
        }

        let allowance = user.plan.monthly_allowance();
        let reset = UserRepository::new(self.db)
            .reset_points_if_due(user.id, allowance, now, start_of_next_month(now))
            .await?;

        match reset {
            Some((previous, updated)) => {
                PointTransactionRepository::new(self.db)
                    .create(
                        updated.id,
                        updated.points - previous,
                        &PointReason::MonthlyReset,
                        updated.points,
                    )
                    .await?;

                tracing::debug!(
                    "Reset points for user {} from {} to {}",
                    updated.id,
                    previous,
                    updated.points
                );

                Ok(updated)
            }
            // Another request reset it first; re-read the fresh balance.
            None => self.require_user(user.id).await,
        }
    }

    /// Resets every user whose period has ended.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of users reset
    pub async fn reset_all_due(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let due = UserRepository::new(self.db).find_due_for_reset(now).await?;

        let mut count = 0;
        for user in due {
            let previous = user.points_reset_at;
            let updated = self.reset_if_due(user, now).await?;
            if updated.points_reset_at != previous {
                count += 1;
            }
        }

        Ok(count)
    }

    /// Current balance after applying any due reset.
    pub async fn balance(&self, user_id: i32) -> Result<PointsBalance, AppError> {
        let user = self.require_user(user_id).await?;
        let user = self.reset_if_due(user, Utc::now()).await?;

        Ok(PointsBalance {
            points: user.points,
            plan: user.plan,
            reset_at: user.points_reset_at,
        })
    }

    /// Atomically spends `cost` points.
    ///
    /// # Returns
    /// - `Ok(i32)` - Balance after the debit
    /// - `Err(AppError::PointsErr(Insufficient))` - Balance below `cost`; nothing changed
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn debit(
        &self,
        user_id: i32,
        cost: i32,
        reason: PointReason,
    ) -> Result<i32, AppError> {
        let user = self.require_user(user_id).await?;
        self.reset_if_due(user, Utc::now()).await?;

        let debited = UserRepository::new(self.db).debit(user_id, cost).await?;

        let Some(user) = debited else {
            let available = self.require_user(user_id).await?.points;
            return Err(PointsError::Insufficient {
                required: cost,
                available,
            }
            .into());
        };

        PointTransactionRepository::new(self.db)
            .create(user_id, -cost, &reason, user.points)
            .await?;

        Ok(user.points)
    }

    /// Returns points taken by a debit whose upstream call failed.
    ///
    /// # Returns
    /// - `Ok(i32)` - Balance after the refund
    pub async fn refund(&self, user_id: i32, amount: i32) -> Result<i32, AppError> {
        self.credit(user_id, amount, PointReason::Refund).await
    }

    /// Passes `result` through, refunding `cost` first when it is an error.
    ///
    /// Wraps everything that runs after a successful [`debit`](Self::debit) so a
    /// request that ends in an error never keeps the user's points.
    pub async fn refund_on_error<T>(
        &self,
        user_id: i32,
        cost: i32,
        result: Result<T, AppError>,
    ) -> Result<T, AppError> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(
                    "Request by user {} failed, refunding {} points: {}",
                    user_id,
                    cost,
                    err
                );
                self.refund(user_id, cost).await?;
                Err(err)
            }
        }
    }

    /// Credits an admin grant.
    ///
    /// # Returns
    /// - `Ok(i32)` - Balance after the grant
    /// - `Err(AppError::BadRequest)` - Amount outside 1..=100000
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn grant(&self, param: GrantPointsParam) -> Result<i32, AppError> {
        if !(1..=MAX_GRANT).contains(&param.amount) {
            return Err(AppError::BadRequest(format!(
                "amount must be between 1 and {}",
                MAX_GRANT
            )));
        }

        let balance = self
            .credit(param.user_id, param.amount, PointReason::AdminGrant(param.note))
            .await?;

        tracing::info!(
            "Granted {} points to user {}, balance now {}",
            param.amount,
            param.user_id,
            balance
        );

        Ok(balance)
    }

    async fn credit(&self, user_id: i32, amount: i32, reason: PointReason) -> Result<i32, AppError> {
        let user = UserRepository::new(self.db)
            .credit(user_id, amount)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        PointTransactionRepository::new(self.db)
            .create(user_id, amount, &reason, user.points)
            .await?;

        Ok(user.points)
    }

    /// Switches the user's plan and refills the balance to the new allowance.
    ///
    /// Used for subscription purchases and admin plan changes. The period end is
    /// left as is.
    pub async fn apply_plan(
        &self,
        user_id: i32,
        plan: Plan,
        reason: PointReason,
    ) -> Result<User, AppError> {
        let (previous, user) = UserRepository::new(self.db)
            .set_plan(user_id, plan, plan.monthly_allowance())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        PointTransactionRepository::new(self.db)
            .create(user_id, user.points - previous, &reason, user.points)
            .await?;

        tracing::info!("User {} moved to plan {}", user_id, plan.as_str());

        Ok(user)
    }

    /// Gets the user's ledger, newest first.
    pub async fn history(
        &self,
        user_id: i32,
        param: PageParam,
    ) -> Result<Paginated<PointTransaction>, AppError> {
        let (entries, total) = PointTransactionRepository::new(self.db)
            .get_by_user_paginated(user_id, param)
            .await?;

        Ok(Paginated::new(entries, total, param))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use test_utils::{builder::TestBuilder, factory};

    #[tokio::test]
    async fn test_debit_records_ledger_entry() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::user::UserFactory::new(db).points(10).build().await.unwrap();
        let service = PointsService::new(db);

        let balance = service
            .debit(user.id, 2, PointReason::CoachingReply)
            .await
            .unwrap();
        assert_eq!(balance, 8);

        let history = service
            .history(user.id, PageParam { page: 0, per_page: 10 })
            .await
            .unwrap();
        assert_eq!(history.items.len(), 1);
        assert_eq!(history.items[0].delta, -2);
        assert_eq!(history.items[0].balance_after, 8);
    }

    #[tokio::test]
    async fn test_debit_insufficient_reports_balance() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::user::UserFactory::new(db).points(3).build().await.unwrap();
        let service = PointsService::new(db);

        let result = service.debit(user.id, 5, PointReason::WritingReview).await;

        match result {
            Err(AppError::PointsErr(err)) => assert_eq!(
                err,
                PointsError::Insufficient {
                    required: 5,
                    available: 3
                }
            ),
            other => panic!("expected insufficient points, got {:?}", other),
        }

        let history = service
            .history(user.id, PageParam { page: 0, per_page: 10 })
            .await
            .unwrap();
        assert!(history.items.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_debits_never_overdraw() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::user::UserFactory::new(db).points(10).build().await.unwrap();

        let user_id = user.id;
        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..8 {
            let db = db.clone();
            tasks.spawn(async move {
                PointsService::new(&db)
                    .debit(user_id, 3, PointReason::CoachingReply)
                    .await
            });
        }

        let mut succeeded = 0;
        while let Some(result) = tasks.join_next().await {
            match result.unwrap() {
                Ok(_) => succeeded += 1,
                Err(AppError::PointsErr(PointsError::Insufficient { .. })) => {}
                Err(other) => panic!("unexpected debit error: {:?}", other),
            }
        }

        let service = PointsService::new(db);
        assert_eq!(succeeded, 10 / 3);
        assert_eq!(service.balance(user.id).await.unwrap().points, 10 - 3 * succeeded);
        let history = service
            .history(user.id, PageParam { page: 0, per_page: 20 })
            .await
            .unwrap();
        assert_eq!(history.total, succeeded as u64);
        assert!(history.items.iter().all(|entry| entry.delta == -3));
    }

    #[tokio::test]
    async fn test_refund_on_error_returns_points_and_error() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::user::UserFactory::new(db).points(6).build().await.unwrap();
        let service = PointsService::new(db);
        service
            .debit(user.id, 4, PointReason::WritingReview)
            .await
            .unwrap();

        let failed: Result<(), AppError> = Err(AppError::NotFound("gone".to_string()));
        let result = service.refund_on_error(user.id, 4, failed).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(service.balance(user.id).await.unwrap().points, 6);

        service
            .debit(user.id, 4, PointReason::WritingReview)
            .await
            .unwrap();
        let kept = service.refund_on_error(user.id, 4, Ok(7)).await.unwrap();
        assert_eq!(kept, 7);
        assert_eq!(service.balance(user.id).await.unwrap().points, 2);
    }

    #[tokio::test]
    async fn test_debit_applies_due_reset_first() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::user::UserFactory::new(db)
            .points(0)
            .points_reset_at(Utc::now() - Duration::days(1))
            .build()
            .await
            .unwrap();

        let balance = PointsService::new(db)
            .debit(user.id, 2, PointReason::CoachingReply)
            .await
            .unwrap();

        assert_eq!(balance, Plan::Free.monthly_allowance() - 2);
    }

    #[tokio::test]
    async fn test_reset_does_not_carry_over() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::user::UserFactory::new(db)
            .plan("standard")
            .points(640)
            .points_reset_at(Utc::now() - Duration::minutes(1))
            .build()
            .await
            .unwrap();

        let balance = PointsService::new(db).balance(user.id).await.unwrap();

        assert_eq!(balance.points, Plan::Standard.monthly_allowance());
        assert!(balance.reset_at > Utc::now());
    }

    #[tokio::test]
    async fn test_reset_ledger_uses_stored_balance_not_snapshot() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::user::UserFactory::new(db)
            .points(40)
            .points_reset_at(Utc::now() - Duration::minutes(1))
            .build()
            .await
            .unwrap();
        let repo = UserRepository::new(db);
        let snapshot = repo.find_by_id(user.id).await.unwrap().unwrap();
        repo.debit(user.id, 15).await.unwrap().unwrap();
        let service = PointsService::new(db);

        let updated = service.reset_if_due(snapshot, Utc::now()).await.unwrap();

        let history = service
            .history(user.id, PageParam { page: 0, per_page: 10 })
            .await
            .unwrap();
        assert_eq!(history.items.len(), 1);
        assert_eq!(history.items[0].delta, updated.points - 25);
        assert_eq!(history.items[0].balance_after, updated.points);
    }

    #[tokio::test]
    async fn test_reset_all_due_counts_users() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let past = Utc::now() - Duration::days(1);
        for _ in 0..2 {
            factory::user::UserFactory::new(db)
                .points_reset_at(past)
                .points(1)
                .build()
                .await
                .unwrap();
        }
        factory::create_user(db).await.unwrap();
        let service = PointsService::new(db);

        assert_eq!(service.reset_all_due(Utc::now()).await.unwrap(), 2);
        assert_eq!(service.reset_all_due(Utc::now()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_refund_restores_balance() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::user::UserFactory::new(db).points(5).build().await.unwrap();
        let service = PointsService::new(db);

        service
            .debit(user.id, 5, PointReason::WritingReview)
            .await
            .unwrap();
        assert_eq!(service.refund(user.id, 5).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_grant_rejects_out_of_range_amount() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await.unwrap();
        let service = PointsService::new(db);

        for amount in [0, -5, MAX_GRANT + 1] {
            let result = service
                .grant(GrantPointsParam {
                    user_id: user.id,
                    amount,
                    note: None,
                })
                .await;
            assert!(matches!(result, Err(AppError::BadRequest(_))));
        }
    }

    #[tokio::test]
    async fn test_grant_to_missing_user_is_not_found() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let result = PointsService::new(db)
            .grant(GrantPointsParam {
                user_id: 999,
                amount: 10,
                note: Some("bonus".to_string()),
            })
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_apply_plan_refills_to_allowance() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::user::UserFactory::new(db).points(12).build().await.unwrap();

        let updated = PointsService::new(db)
            .apply_plan(user.id, Plan::Premium, PointReason::Subscription)
            .await
            .unwrap();

        assert_eq!(updated.plan, Plan::Premium);
        assert_eq!(updated.points, Plan::Premium.monthly_allowance());

        let history = PointsService::new(db)
            .history(user.id, PageParam { page: 0, per_page: 1 })
            .await
            .unwrap();
        assert_eq!(history.items[0].delta, Plan::Premium.monthly_allowance() - 12);
    }
}
