use super::*;

/// Tests reading a user's ledger.
///
/// Expected: newest entry first, other users' entries excluded
#[tokio::test]
async fn lists_entries_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let repo = PointTransactionRepository::new(db);

    repo.create(user.id, 100, &PointReason::SignupBonus, 100)
        .await?;
    repo.create(user.id, -2, &PointReason::CoachingReply, 98)
        .await?;
    repo.create(other.id, 100, &PointReason::SignupBonus, 100)
        .await?;

    let (entries, total) = repo
        .get_by_user_paginated(
            user.id,
            PageParam {
                page: 0,
                per_page: 10,
            },
        )
        .await?;

    assert_eq!(total, 2);
    assert_eq!(entries[0].reason, "coaching_reply");
    assert_eq!(entries[0].balance_after, 98);
    assert_eq!(entries[1].reason, "signup_bonus");

    Ok(())
}
