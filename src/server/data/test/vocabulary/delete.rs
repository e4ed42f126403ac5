use super::*;

/// Tests deleting words.
///
/// Expected: owner can delete, other users cannot
#[tokio::test]
async fn deletes_only_owned_word() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let word = factory::create_word(db, owner.id).await?;
    let repo = VocabularyRepository::new(db);

    assert!(!repo.delete(other.id, word.id).await?);
    assert!(repo.delete(owner.id, word.id).await?);
    assert!(repo.find(owner.id, word.id).await?.is_none());

    Ok(())
}
