use super::*;

/// Tests refreshing identity fields on a later login.
///
/// Expected: email and name updated, points and plan untouched
#[tokio::test]
async fn updates_email_and_name_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let existing = factory::user::UserFactory::new(db)
        .plan("premium")
        .points(42)
        .build()
        .await?;

    let user = UserRepository::new(db)
        .update_identity(
            existing.id,
            UpsertUserParam {
                subject: existing.subject.clone(),
                email: "new@example.com".to_string(),
                display_name: "Renamed".to_string(),
                avatar_url: None,
                grant_admin: false,
            },
        )
        .await?
        .unwrap();

    assert_eq!(user.email, "new@example.com");
    assert_eq!(user.display_name, "Renamed");
    assert_eq!(user.points, 42);
    assert_eq!(user.plan, Plan::Premium);

    Ok(())
}

/// Tests that a login without the admin grant does not revoke admin.
///
/// Expected: admin flag preserved
#[tokio::test]
async fn never_revokes_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let existing = factory::user::UserFactory::new(db).admin(true).build().await?;

    let user = UserRepository::new(db)
        .update_identity(
            existing.id,
            UpsertUserParam {
                subject: existing.subject.clone(),
                email: existing.email.clone(),
                display_name: existing.display_name.clone(),
                avatar_url: None,
                grant_admin: false,
            },
        )
        .await?
        .unwrap();

    assert!(user.admin);

    Ok(())
}

/// Tests granting admin on login.
///
/// Expected: admin flag set
#[tokio::test]
async fn grants_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let existing = factory::create_user(db).await?;

    let user = UserRepository::new(db)
        .update_identity(
            existing.id,
            UpsertUserParam {
                subject: existing.subject.clone(),
                email: existing.email.clone(),
                display_name: existing.display_name.clone(),
                avatar_url: None,
                grant_admin: true,
            },
        )
        .await?
        .unwrap();

    assert!(user.admin);

    Ok(())
}
