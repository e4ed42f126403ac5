use super::*;

/// Tests listing sessions.
///
/// Expected: most recently updated first, foreign sessions excluded
#[tokio::test]
async fn lists_own_sessions_recent_first() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let now = Utc::now();

    let older = factory::coaching_session::SessionFactory::new(db, user.id)
        .updated_at(now - Duration::days(2))
        .build()
        .await?;
    let newer = factory::coaching_session::SessionFactory::new(db, user.id)
        .topic("Travel")
        .updated_at(now)
        .build()
        .await?;
    factory::create_session(db, other.id).await?;

    let sessions = CoachingRepository::new(db)
        .get_sessions_by_user(user.id)
        .await?;

    let ids: Vec<_> = sessions.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    Ok(())
}
