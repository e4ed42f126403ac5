use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::points::PointsService};

/// Midnight UTC on the first day of every month (sec min hour day month weekday).
const MONTHLY_RESET_SCHEDULE: &str = "0 0 0 1 * *";

/// Starts the monthly points reset scheduler.
///
/// Balances are also refilled lazily on access, so a missed run only delays the
/// reset of inactive users.
///
/// # Arguments
/// - `db`: Database connection
pub async fn start_scheduler(db: DatabaseConnection) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(MONTHLY_RESET_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = reset_due_points(&db).await {
                tracing::error!("Error resetting monthly points: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Monthly points reset scheduler started");

    Ok(scheduler)
}

/// Refills every balance whose period has ended.
///
/// # Returns
/// - `Ok(usize)` - Number of users reset
pub async fn reset_due_points(db: &DatabaseConnection) -> Result<usize, AppError> {
    let count = PointsService::new(db).reset_all_due(Utc::now()).await?;

    tracing::info!("Monthly points reset applied to {} users", count);

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use test_utils::{builder::TestBuilder, factory};

    #[tokio::test]
    async fn test_resets_only_due_users_once() {
        let test = TestBuilder::new().with_user_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        factory::user::UserFactory::new(db)
            .points(3)
            .points_reset_at(Utc::now() - Duration::days(1))
            .build()
            .await
            .unwrap();
        factory::user::UserFactory::new(db).points(3).build().await.unwrap();

        assert_eq!(reset_due_points(db).await.unwrap(), 1);
        assert_eq!(reset_due_points(db).await.unwrap(), 0);
    }

    #[test]
    fn test_schedule_parses() {
        assert!(Job::new_async(MONTHLY_RESET_SCHEDULE, |_uuid, _lock| Box::pin(async {})).is_ok());
    }
}
