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
                    .table(QuizAttempt::Table)
                    .if_not_exists()
                    .col(pk_auto(QuizAttempt::Id))
                    .col(integer(QuizAttempt::UserId))
                    .col(integer(QuizAttempt::Total))
                    .col(integer(QuizAttempt::Correct))
                    .col(
                        timestamp_with_time_zone(QuizAttempt::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quiz_attempt_user_id")
                            .from(QuizAttempt::Table, QuizAttempt::UserId)
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
            .drop_table(Table::drop().table(QuizAttempt::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum QuizAttempt {
    Table,
    Id,
    UserId,
    Total,
    Correct,
    CreatedAt,
}
