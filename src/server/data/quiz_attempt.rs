//! Quiz attempt repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{page::PageParam, quiz::QuizAttempt};

pub struct QuizAttemptRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> QuizAttemptRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        total: i32,
        correct: i32,
    ) -> Result<QuizAttempt, DbErr> {
        let entity = entity::quiz_attempt::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            total: ActiveValue::Set(total),
            correct: ActiveValue::Set(correct),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(QuizAttempt::from_entity(entity))
    }

    /// Gets a user's attempts, newest first.
    pub async fn get_by_user_paginated(
        &self,
        user_id: i32,
        param: PageParam,
    ) -> Result<(Vec<QuizAttempt>, u64), DbErr> {
        let paginator = entity::prelude::QuizAttempt::find()
            .filter(entity::quiz_attempt::Column::UserId.eq(user_id))
            .order_by_desc(entity::quiz_attempt::Column::CreatedAt)
            .order_by_desc(entity::quiz_attempt::Column::Id)
            .paginate(self.db, param.per_page);

        let total = paginator.num_items().await?;
        let attempts = paginator
            .fetch_page(param.page)
            .await?
            .into_iter()
            .map(QuizAttempt::from_entity)
            .collect();

        Ok((attempts, total))
    }
}
