use super::*;

/// Tests storing a learner message with its reply.
///
/// Expected: both messages stored in order, assistant reply returned
#[tokio::test]
async fn stores_both_messages_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let session = factory::create_session(db, user.id).await?;
    let repo = CoachingRepository::new(db);

    let reply = repo
        .append_exchange(session.id, "Hello!".to_string(), "Hi there!".to_string())
        .await?;

    assert_eq!(reply.role, ChatRole::Assistant);
    assert_eq!(reply.content, "Hi there!");

    let messages = repo.get_messages(session.id).await?;
    let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![ChatRole::User, ChatRole::Assistant]);

    Ok(())
}

/// Tests the history window.
///
/// Expected: only the latest messages, still in conversation order
#[tokio::test]
async fn recent_messages_keep_conversation_order() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let session = factory::create_session(db, user.id).await?;
    let repo = CoachingRepository::new(db);

    for i in 0..3 {
        repo.append_exchange(session.id, format!("q{}", i), format!("a{}", i))
            .await?;
    }

    let recent = repo.get_recent_messages(session.id, 3).await?;
    let contents: Vec<_> = recent.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["a1", "q2", "a2"]);

    Ok(())
}

/// Tests appending to a session that no longer exists.
///
/// Expected: NotFound and no messages written
#[tokio::test]
async fn missing_session_stores_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let session = factory::create_session(db, user.id).await?;
    let repo = CoachingRepository::new(db);
    repo.delete_session(user.id, session.id).await?;

    let result = repo
        .append_exchange(session.id, "Hello!".to_string(), "Hi there!".to_string())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(repo.get_messages(session.id).await?.is_empty());

    Ok(())
}
