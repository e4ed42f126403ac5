use super::*;

/// Tests the quiz ordering of a user's words.
///
/// Expected: due words first, each group ordered by mastery then review date
#[tokio::test]
async fn orders_due_first_then_by_mastery() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let now = Utc::now();

    let pending_strong = factory::vocabulary_word::WordFactory::new(db, user.id)
        .mastery(5)
        .next_review_at(now + Duration::hours(1))
        .build()
        .await?;
    let pending_weak = factory::vocabulary_word::WordFactory::new(db, user.id)
        .mastery(0)
        .next_review_at(now + Duration::hours(2))
        .build()
        .await?;
    let due_strong = factory::vocabulary_word::WordFactory::new(db, user.id)
        .mastery(4)
        .next_review_at(now - Duration::days(2))
        .build()
        .await?;
    let due_weak = factory::vocabulary_word::WordFactory::new(db, user.id)
        .mastery(1)
        .next_review_at(now - Duration::hours(1))
        .build()
        .await?;

    let words = VocabularyRepository::new(db)
        .get_all_by_review_order(user.id, now)
        .await?;

    let ids: Vec<_> = words.iter().map(|w| w.id).collect();
    assert_eq!(
        ids,
        vec![due_weak.id, due_strong.id, pending_weak.id, pending_strong.id]
    );

    Ok(())
}
