use super::*;

/// Tests resetting a user whose period has ended.
///
/// Expected: balance refilled without carry-over, next reset date stored, replaced
/// balance reported
#[tokio::test]
async fn resets_when_period_over() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();
    let user = factory::user::UserFactory::new(db)
        .points(73)
        .points_reset_at(now - Duration::hours(1))
        .build()
        .await?;
    let next = now + Duration::days(30);

    let (previous, updated) = UserRepository::new(db)
        .reset_points_if_due(user.id, 100, now, next)
        .await?
        .unwrap();

    assert_eq!(previous, 73);
    assert_eq!(updated.points, 100);
    assert_eq!(updated.points_reset_at, next);

    Ok(())
}

/// Tests that a second reset in the same period is a no-op.
///
/// Expected: first call applies, second returns None
#[tokio::test]
async fn reset_is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();
    let user = factory::user::UserFactory::new(db)
        .points_reset_at(now - Duration::minutes(5))
        .build()
        .await?;
    let repo = UserRepository::new(db);
    let next = now + Duration::days(30);

    assert!(repo
        .reset_points_if_due(user.id, 100, now, next)
        .await?
        .is_some());
    assert!(repo
        .reset_points_if_due(user.id, 100, now, next)
        .await?
        .is_none());

    Ok(())
}

/// Tests finding users due for a reset.
///
/// Expected: only the user whose period ended is returned
#[tokio::test]
async fn finds_only_due_users() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();
    let due = factory::user::UserFactory::new(db)
        .points_reset_at(now - Duration::days(1))
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .points_reset_at(now + Duration::days(1))
        .build()
        .await?;

    let users = UserRepository::new(db).find_due_for_reset(now).await?;

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, due.id);

    Ok(())
}
