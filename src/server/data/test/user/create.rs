use super::*;

/// Tests registering a new user.
///
/// Expected: free plan, full free allowance, beginner level, not admin
#[tokio::test]
async fn creates_user_on_free_plan() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let reset_at = Utc::now() + Duration::days(10);
    let user = UserRepository::new(db)
        .create(
            UpsertUserParam {
                subject: "sub-1".to_string(),
                email: "learner@example.com".to_string(),
                display_name: "Learner".to_string(),
                avatar_url: None,
                grant_admin: false,
            },
            reset_at,
        )
        .await?;

    assert_eq!(user.subject, "sub-1");
    assert_eq!(user.plan, Plan::Free);
    assert_eq!(user.points, Plan::Free.monthly_allowance());
    assert_eq!(user.points_reset_at, reset_at);
    assert!(!user.admin);
    assert!(user.avatar_url.is_none());

    Ok(())
}

/// Tests that a duplicate subject is rejected.
///
/// Expected: Err on second insert with the same subject
#[tokio::test]
async fn rejects_duplicate_subject() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let existing = factory::create_user(db).await?;

    let result = UserRepository::new(db)
        .create(
            UpsertUserParam {
                subject: existing.subject,
                email: "other@example.com".to_string(),
                display_name: "Other".to_string(),
                avatar_url: None,
                grant_admin: false,
            },
            Utc::now(),
        )
        .await;

    assert!(result.is_err());

    Ok(())
}
