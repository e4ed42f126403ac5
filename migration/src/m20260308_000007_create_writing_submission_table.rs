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
                    .table(WritingSubmission::Table)
                    .if_not_exists()
                    .col(pk_auto(WritingSubmission::Id))
                    .col(integer(WritingSubmission::UserId))
                    .col(string_null(WritingSubmission::Prompt))
                    .col(text(WritingSubmission::OriginalText))
                    .col(text(WritingSubmission::CorrectedText))
                    .col(text(WritingSubmission::Feedback))
                    .col(integer(WritingSubmission::Score))
                    .col(
                        timestamp_with_time_zone(WritingSubmission::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_writing_submission_user_id")
                            .from(WritingSubmission::Table, WritingSubmission::UserId)
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
            .drop_table(Table::drop().table(WritingSubmission::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WritingSubmission {
    Table,
    Id,
    UserId,
    Prompt,
    OriginalText,
    CorrectedText,
    Feedback,
    Score,
    CreatedAt,
}
