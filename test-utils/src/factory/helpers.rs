//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user owning `count` words, enough to build a quiz from.
///
/// Words are named `word-<n>` with meaning `meaning-<n>` and are all due now.
///
/// # Returns
/// - `Ok((user, words))` - The owner and the words in insertion order
/// - `Err(DbErr)` - Database error during creation
pub async fn create_user_with_words(
    db: &DatabaseConnection,
    count: usize,
) -> Result<(entity::user::Model, Vec<entity::vocabulary_word::Model>), DbErr> {
    let user = crate::factory::user::create_user(db).await?;

    let mut words = Vec::with_capacity(count);
    for _ in 0..count {
        words.push(crate::factory::vocabulary_word::create_word(db, user.id).await?);
    }

    Ok((user, words))
}
