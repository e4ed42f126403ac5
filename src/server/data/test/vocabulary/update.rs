use super::*;

/// Tests updating an owned word.
///
/// Expected: new fields returned
#[tokio::test]
async fn updates_owned_word() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let word = factory::create_word(db, user.id).await?;

    let updated = VocabularyRepository::new(db)
        .update(
            user.id,
            word.id,
            WordFieldsParam {
                term: "resilient".to_string(),
                meaning: "able to recover quickly".to_string(),
                example: Some("She is resilient.".to_string()),
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.term, "resilient");
    assert_eq!(updated.example.as_deref(), Some("She is resilient."));
    assert_eq!(updated.mastery, word.mastery);

    Ok(())
}

/// Tests that a foreign word cannot be updated.
///
/// Expected: None and original row unchanged
#[tokio::test]
async fn ignores_foreign_word() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let intruder = factory::create_user(db).await?;
    let word = factory::create_word(db, owner.id).await?;
    let repo = VocabularyRepository::new(db);

    let updated = repo
        .update(intruder.id, word.id, fields("hijacked", "nope"))
        .await?;

    assert!(updated.is_none());
    assert_eq!(repo.find(owner.id, word.id).await?.unwrap().term, word.term);

    Ok(())
}
