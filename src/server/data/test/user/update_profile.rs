use super::*;
use crate::server::model::user::{Level, UpdateProfileParam};

/// Tests a partial profile update.
///
/// Expected: level changed, display name kept
#[tokio::test]
async fn updates_only_given_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let updated = UserRepository::new(db)
        .update_profile(
            user.id,
            UpdateProfileParam {
                display_name: None,
                level: Some(Level::Intermediate),
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.level, Level::Intermediate);
    assert_eq!(updated.display_name, user.display_name);

    Ok(())
}

/// Tests an empty profile update.
///
/// Expected: user returned unchanged
#[tokio::test]
async fn empty_update_returns_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let updated = UserRepository::new(db)
        .update_profile(user.id, UpdateProfileParam::default())
        .await?
        .unwrap();

    assert_eq!(updated.display_name, user.display_name);
    assert_eq!(updated.level, Level::Beginner);

    Ok(())
}
