use super::*;

/// Tests the case-insensitive duplicate check.
///
/// Expected: same term in different casing is found
#[tokio::test]
async fn matches_ignoring_case() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let repo = VocabularyRepository::new(db);
    repo.create(user.id, fields("Serendipity", "a happy accident"))
        .await?;

    assert!(repo.term_exists(user.id, "serendipity", None).await?);
    assert!(!repo.term_exists(user.id, "serenity", None).await?);

    Ok(())
}

/// Tests that other users' words do not count as duplicates.
///
/// Expected: false for a different owner
#[tokio::test]
async fn scoped_to_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::vocabulary_word::WordFactory::new(db, owner.id)
        .term("grit")
        .build()
        .await?;

    let repo = VocabularyRepository::new(db);
    assert!(!repo.term_exists(other.id, "grit", None).await?);

    Ok(())
}

/// Tests excluding the word being edited.
///
/// Expected: renaming a word to a new casing of itself is not a duplicate
#[tokio::test]
async fn excludes_given_word() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let word = factory::vocabulary_word::WordFactory::new(db, user.id)
        .term("grit")
        .build()
        .await?;

    let repo = VocabularyRepository::new(db);
    assert!(!repo.term_exists(user.id, "GRIT", Some(word.id)).await?);

    Ok(())
}

/// Tests case folding beyond ASCII.
///
/// Expected: "café" matches a stored "CAFÉ"
#[tokio::test]
async fn matches_non_ascii_casing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let repo = VocabularyRepository::new(db);
    repo.create(user.id, fields("CAFÉ", "a small restaurant"))
        .await?;

    assert!(repo.term_exists(user.id, "café", None).await?);

    Ok(())
}
