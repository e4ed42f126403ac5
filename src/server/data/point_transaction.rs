//! Point ledger repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    page::PageParam,
    points::{PointReason, PointTransaction},
};

pub struct PointTransactionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PointTransactionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a ledger row.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the balance
    /// - `delta` - Signed change applied to the balance
    /// - `reason` - Why the balance changed
    /// - `balance_after` - Balance once `delta` was applied
    pub async fn create(
        &self,
        user_id: i32,
        delta: i32,
        reason: &PointReason,
        balance_after: i32,
    ) -> Result<PointTransaction, DbErr> {
        let entity = entity::point_transaction::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            delta: ActiveValue::Set(delta),
            reason: ActiveValue::Set(reason.as_string()),
            balance_after: ActiveValue::Set(balance_after),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(PointTransaction::from_entity(entity))
    }

    /// Gets a user's ledger, newest first.
    pub async fn get_by_user_paginated(
        &self,
        user_id: i32,
        param: PageParam,
    ) -> Result<(Vec<PointTransaction>, u64), DbErr> {
        let paginator = entity::prelude::PointTransaction::find()
            .filter(entity::point_transaction::Column::UserId.eq(user_id))
            .order_by_desc(entity::point_transaction::Column::CreatedAt)
            .order_by_desc(entity::point_transaction::Column::Id)
            .paginate(self.db, param.per_page);

        let total = paginator.num_items().await?;
        let entries = paginator
            .fetch_page(param.page)
            .await?
            .into_iter()
            .map(PointTransaction::from_entity)
            .collect();

        Ok((entries, total))
    }
}
