use super::*;

/// Tests alphabetical pagination of a user's words.
///
/// Expected: words sorted by term, foreign words excluded from total
#[tokio::test]
async fn lists_words_alphabetically() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    for term in ["zeal", "apple", "mellow"] {
        factory::vocabulary_word::WordFactory::new(db, user.id)
            .term(term)
            .build()
            .await?;
    }
    factory::create_word(db, other.id).await?;

    let (words, total) = VocabularyRepository::new(db)
        .get_by_user_paginated(
            user.id,
            PageParam {
                page: 0,
                per_page: 2,
            },
        )
        .await?;

    assert_eq!(total, 3);
    let terms: Vec<_> = words.iter().map(|w| w.term.as_str()).collect();
    assert_eq!(terms, vec!["apple", "mellow"]);

    Ok(())
}
