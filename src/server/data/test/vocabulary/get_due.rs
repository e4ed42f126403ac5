use super::*;

/// Tests listing due words.
///
/// Expected: only words due by now, most overdue first, limited
#[tokio::test]
async fn returns_due_words_oldest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let now = Utc::now();

    let recent = factory::vocabulary_word::WordFactory::new(db, user.id)
        .next_review_at(now - Duration::hours(1))
        .build()
        .await?;
    let overdue = factory::vocabulary_word::WordFactory::new(db, user.id)
        .next_review_at(now - Duration::days(3))
        .build()
        .await?;
    factory::vocabulary_word::WordFactory::new(db, user.id)
        .next_review_at(now + Duration::days(2))
        .build()
        .await?;

    let due = VocabularyRepository::new(db).get_due(user.id, now, 20).await?;

    let ids: Vec<_> = due.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![overdue.id, recent.id]);

    let limited = VocabularyRepository::new(db).get_due(user.id, now, 1).await?;
    assert_eq!(limited.len(), 1);

    Ok(())
}
