use super::*;
use sea_orm::SqlErr;

/// Tests that the database itself refuses a second casing of a saved term.
///
/// Expected: unique constraint violation, even for non-ASCII letters
#[tokio::test]
async fn rejects_same_term_in_other_casing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let repo = VocabularyRepository::new(db);
    repo.create(user.id, fields("CAFÉ", "a small restaurant"))
        .await?;

    let err = repo
        .create(user.id, fields("café", "a coffee shop"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}

/// Tests that two users may save the same term.
///
/// Expected: both inserts succeed
#[tokio::test]
async fn allows_same_term_for_different_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let repo = VocabularyRepository::new(db);

    repo.create(first.id, fields("grit", "courage")).await?;
    repo.create(second.id, fields("Grit", "courage")).await?;

    Ok(())
}
