pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_point_transaction_table;
mod m20260302_000003_create_coaching_session_table;
mod m20260302_000004_create_coaching_message_table;
mod m20260305_000005_create_vocabulary_word_table;
mod m20260305_000006_create_quiz_attempt_table;
mod m20260308_000007_create_writing_submission_table;
mod m20260312_000008_add_vocabulary_review_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_point_transaction_table::Migration),
            Box::new(m20260302_000003_create_coaching_session_table::Migration),
            Box::new(m20260302_000004_create_coaching_message_table::Migration),
            Box::new(m20260305_000005_create_vocabulary_word_table::Migration),
            Box::new(m20260305_000006_create_quiz_attempt_table::Migration),
            Box::new(m20260308_000007_create_writing_submission_table::Migration),
            Box::new(m20260312_000008_add_vocabulary_review_index::Migration),
        ]
    }
}
