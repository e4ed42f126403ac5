use super::*;
use crate::server::model::billing::SetBillingParam;

/// Tests storing subscription state.
///
/// Expected: plan and identifiers written, balance untouched
#[tokio::test]
async fn writes_billing_fields_without_touching_points() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db).points(7).build().await?;
    let repo = UserRepository::new(db);

    let updated = repo
        .set_billing(
            user.id,
            SetBillingParam {
                plan: Plan::Standard,
                customer_id: Some("cus_1".to_string()),
                subscription_id: Some("sub_1".to_string()),
                status: Some("active".to_string()),
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.plan, Plan::Standard);
    assert_eq!(updated.points, 7);
    assert_eq!(updated.stripe_customer_id.as_deref(), Some("cus_1"));

    let found = repo.find_by_subscription_id("sub_1").await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests clearing the subscription id.
///
/// Expected: subscription no longer resolvable by id
#[tokio::test]
async fn clears_subscription_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db)
        .plan("premium")
        .subscribed("cus_2", "sub_2")
        .build()
        .await?;
    let repo = UserRepository::new(db);

    repo.set_billing(
        user.id,
        SetBillingParam {
            plan: Plan::Free,
            customer_id: Some("cus_2".to_string()),
            subscription_id: None,
            status: Some("canceled".to_string()),
        },
    )
    .await?;

    assert!(repo.find_by_subscription_id("sub_2").await?.is_none());

    Ok(())
}
