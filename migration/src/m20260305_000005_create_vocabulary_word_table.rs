use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VocabularyWord::Table)
                    .if_not_exists()
                    .col(pk_auto(VocabularyWord::Id))
                    .col(integer(VocabularyWord::UserId))
                    .col(string(VocabularyWord::Term))
                    .col(string(VocabularyWord::TermKey).unique_key())
                    .col(string(VocabularyWord::Meaning))
                    .col(text_null(VocabularyWord::Example))
                    .col(integer(VocabularyWord::Mastery).default(0))
                    .col(timestamp_with_time_zone(VocabularyWord::NextReviewAt))
                    .col(
                        timestamp_with_time_zone(VocabularyWord::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vocabulary_word_user_id")
                            .from(VocabularyWord::Table, VocabularyWord::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VocabularyWord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VocabularyWord {
    Table,
    Id,
    UserId,
    Term,
    TermKey,
    Meaning,
    Example,
    Mastery,
    NextReviewAt,
    CreatedAt,
}
