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
                    .table(PointTransaction::Table)
                    .if_not_exists()
                    .col(pk_auto(PointTransaction::Id))
                    .col(integer(PointTransaction::UserId))
                    .col(integer(PointTransaction::Delta))
                    .col(string(PointTransaction::Reason))
                    .col(integer(PointTransaction::BalanceAfter))
                    .col(
                        timestamp_with_time_zone(PointTransaction::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_point_transaction_user_id")
                            .from(PointTransaction::Table, PointTransaction::UserId)
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
            .drop_table(Table::drop().table(PointTransaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PointTransaction {
    Table,
    Id,
    UserId,
    Delta,
    Reason,
    BalanceAfter,
    CreatedAt,
}
