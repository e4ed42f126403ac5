//! Writing submission repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    page::PageParam,
    writing::{SubmitWritingParam, WritingReview, WritingSubmission},
};

pub struct WritingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WritingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a reviewed submission.
    pub async fn create(
        &self,
        user_id: i32,
        param: SubmitWritingParam,
        review: WritingReview,
    ) -> Result<WritingSubmission, DbErr> {
        let entity = entity::writing_submission::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            prompt: ActiveValue::Set(param.prompt),
            original_text: ActiveValue::Set(param.text),
            corrected_text: ActiveValue::Set(review.corrected_text),
            feedback: ActiveValue::Set(review.feedback),
            score: ActiveValue::Set(review.score as i32),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(WritingSubmission::from_entity(entity))
    }

    pub async fn find(
        &self,
        user_id: i32,
        submission_id: i32,
    ) -> Result<Option<WritingSubmission>, DbErr> {
        let entity = entity::prelude::WritingSubmission::find_by_id(submission_id)
            .filter(entity::writing_submission::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(WritingSubmission::from_entity))
    }

    /// Gets a user's submissions, newest first.
    pub async fn get_by_user_paginated(
        &self,
        user_id: i32,
        param: PageParam,
    ) -> Result<(Vec<WritingSubmission>, u64), DbErr> {
        let paginator = entity::prelude::WritingSubmission::find()
            .filter(entity::writing_submission::Column::UserId.eq(user_id))
            .order_by_desc(entity::writing_submission::Column::CreatedAt)
            .order_by_desc(entity::writing_submission::Column::Id)
            .paginate(self.db, param.per_page);

        let total = paginator.num_items().await?;
        let submissions = paginator
            .fetch_page(param.page)
            .await?
            .into_iter()
            .map(WritingSubmission::from_entity)
            .collect();

        Ok((submissions, total))
    }
}
