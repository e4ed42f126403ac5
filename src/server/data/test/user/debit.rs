use super::*;

/// Tests debiting within the balance.
///
/// Expected: Some(user) with the reduced balance
#[tokio::test]
async fn debits_when_balance_covers_cost() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db).points(10).build().await?;

    let updated = UserRepository::new(db).debit(user.id, 4).await?;

    assert_eq!(updated.map(|u| u.points), Some(6));

    Ok(())
}

/// Tests debiting the exact balance.
///
/// Expected: balance drops to zero
#[tokio::test]
async fn debits_exact_balance_to_zero() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db).points(5).build().await?;

    let updated = UserRepository::new(db).debit(user.id, 5).await?;

    assert_eq!(updated.map(|u| u.points), Some(0));

    Ok(())
}

/// Tests that an insufficient balance is left untouched.
///
/// Expected: None and balance unchanged
#[tokio::test]
async fn refuses_debit_beyond_balance() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db).points(1).build().await?;
    let repo = UserRepository::new(db);

    let updated = repo.debit(user.id, 2).await?;
    assert!(updated.is_none());

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(stored.points, 1);

    Ok(())
}

/// Tests that repeated debits stop at zero instead of going negative.
///
/// Expected: exactly 3 of 5 debits of 2 succeed from a balance of 6
#[tokio::test]
async fn repeated_debits_never_go_negative() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db).points(6).build().await?;
    let repo = UserRepository::new(db);

    let mut succeeded = 0;
    for _ in 0..5 {
        if repo.debit(user.id, 2).await?.is_some() {
            succeeded += 1;
        }
    }

    assert_eq!(succeeded, 3);
    assert_eq!(repo.find_by_id(user.id).await?.unwrap().points, 0);

    Ok(())
}
