use sea_orm_migration::prelude::*;

use crate::m20260305_000005_create_vocabulary_word_table::VocabularyWord;

const INDEX_NAME: &str = "idx_vocabulary_word_user_next_review";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(VocabularyWord::Table)
                    .col(VocabularyWord::UserId)
                    .col(VocabularyWord::NextReviewAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(INDEX_NAME)
                    .table(VocabularyWord::Table)
                    .to_owned(),
            )
            .await
    }
}
