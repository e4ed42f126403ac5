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
                    .table(CoachingSession::Table)
                    .if_not_exists()
                    .col(pk_auto(CoachingSession::Id))
                    .col(integer(CoachingSession::UserId))
                    .col(string(CoachingSession::Title))
                    .col(string_null(CoachingSession::Topic))
                    .col(
                        timestamp_with_time_zone(CoachingSession::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(CoachingSession::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coaching_session_user_id")
                            .from(CoachingSession::Table, CoachingSession::UserId)
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
            .drop_table(Table::drop().table(CoachingSession::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CoachingSession {
    Table,
    Id,
    UserId,
    Title,
    Topic,
    CreatedAt,
    UpdatedAt,
}
