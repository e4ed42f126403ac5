use super::*;

/// Tests deleting a session with messages.
///
/// Expected: session and its messages gone
#[tokio::test]
async fn deletes_session_and_messages() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let session = factory::create_session(db, user.id).await?;
    let repo = CoachingRepository::new(db);
    repo.append_exchange(session.id, "Hi".to_string(), "Hello".to_string())
        .await?;

    assert!(repo.delete_session(user.id, session.id).await?);
    assert!(repo.find_session(user.id, session.id).await?.is_none());
    assert!(repo.get_messages(session.id).await?.is_empty());

    Ok(())
}

/// Tests that another user's session is not deleted.
///
/// Expected: false and session still present
#[tokio::test]
async fn refuses_foreign_session() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let session = factory::create_session(db, owner.id).await?;
    let repo = CoachingRepository::new(db);

    assert!(!repo.delete_session(other.id, session.id).await?);
    assert!(repo.find_session(owner.id, session.id).await?.is_some());

    Ok(())
}
