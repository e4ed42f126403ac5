use super::*;

/// Tests a logged-out session is rejected.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_anonymous_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests a session pointing at a deleted user is rejected.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_missing_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(999).await?;
    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(999)))
    ));

    Ok(())
}

/// Tests a regular user cannot pass an admin check.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_admin_to_regular_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let user = factory::create_user(db).await?;

    AuthSession::new(session).set_user_id(user.id).await?;
    let guard = AuthGuard::new(db, session);

    assert_eq!(guard.require(&[]).await?.id, user.id);
    assert!(matches!(
        guard.require(&[Permission::Admin]).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests an admin passes the admin check.
///
/// Expected: Ok(User) with admin set
#[tokio::test]
async fn allows_admin() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let admin = factory::user::UserFactory::new(db).admin(true).build().await?;

    AuthSession::new(session).set_user_id(admin.id).await?;
    let user = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await?;

    assert!(user.admin);

    Ok(())
}

/// Tests the guard refills a balance whose period has ended.
///
/// Expected: Ok(User) with the free allowance and a later reset date
#[tokio::test]
async fn applies_due_reset() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let user = factory::user::UserFactory::new(db)
        .points(7)
        .points_reset_at(Utc::now() - Duration::hours(1))
        .build()
        .await?;

    AuthSession::new(session).set_user_id(user.id).await?;
    let user = AuthGuard::new(db, session).require(&[]).await?;

    assert_eq!(user.points, 100);
    assert!(user.points_reset_at > Utc::now());

    Ok(())
}
