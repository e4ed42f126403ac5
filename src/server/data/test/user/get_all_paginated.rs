use super::*;
use crate::server::model::page::PageParam;

/// Tests paginating users.
///
/// Expected: page size respected, total counts every user
#[tokio::test]
async fn paginates_users_by_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    for _ in 0..5 {
        factory::create_user(db).await?;
    }

    let repo = UserRepository::new(db);
    let (first, total) = repo
        .get_all_paginated(PageParam {
            page: 0,
            per_page: 2,
        })
        .await?;
    let (last, _) = repo
        .get_all_paginated(PageParam {
            page: 2,
            per_page: 2,
        })
        .await?;

    assert_eq!(total, 5);
    assert_eq!(first.len(), 2);
    assert!(first[0].id < first[1].id);
    assert_eq!(last.len(), 1);

    Ok(())
}
