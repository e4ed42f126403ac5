use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_uniq(User::Subject))
                    .col(string(User::Email))
                    .col(string(User::DisplayName))
                    .col(string_null(User::AvatarUrl))
                    .col(string(User::Level).default("beginner"))
                    .col(boolean(User::Admin).default(false))
                    .col(string(User::Plan).default("free"))
                    .col(integer(User::Points).default(0))
                    .col(timestamp_with_time_zone(User::PointsResetAt))
                    .col(string_null(User::StripeCustomerId))
                    .col(string_null(User::StripeSubscriptionId))
                    .col(string_null(User::SubscriptionStatus))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Subject,
    Email,
    DisplayName,
    AvatarUrl,
    Level,
    Admin,
    Plan,
    Points,
    PointsResetAt,
    StripeCustomerId,
    StripeSubscriptionId,
    SubscriptionStatus,
    CreatedAt,
}
