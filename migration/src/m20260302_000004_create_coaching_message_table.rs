use sea_orm_migration::{prelude::*, schema::*};

use super::m20260302_000003_create_coaching_session_table::CoachingSession;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CoachingMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(CoachingMessage::Id))
                    .col(integer(CoachingMessage::SessionId))
                    .col(string(CoachingMessage::Role))
                    .col(text(CoachingMessage::Content))
                    .col(
                        timestamp_with_time_zone(CoachingMessage::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coaching_message_session_id")
                            .from(CoachingMessage::Table, CoachingMessage::SessionId)
                            .to(CoachingSession::Table, CoachingSession::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CoachingMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CoachingMessage {
    Table,
    Id,
    SessionId,
    Role,
    Content,
    CreatedAt,
}
