//! Coaching session and message repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::server::{
    error::AppError,
    model::coaching::{ChatRole, CoachingMessage, CoachingSession, CreateSessionParam},
};

pub struct CoachingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CoachingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_session(
        &self,
        user_id: i32,
        param: CreateSessionParam,
    ) -> Result<CoachingSession, DbErr> {
        let now = Utc::now();
        let entity = entity::coaching_session::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            title: ActiveValue::Set(param.title),
            topic: ActiveValue::Set(param.topic),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(CoachingSession::from_entity(entity))
    }

    /// Gets a user's sessions, most recently active first.
    pub async fn get_sessions_by_user(&self, user_id: i32) -> Result<Vec<CoachingSession>, DbErr> {
        let entities = entity::prelude::CoachingSession::find()
            .filter(entity::coaching_session::Column::UserId.eq(user_id))
            .order_by_desc(entity::coaching_session::Column::UpdatedAt)
            .order_by_desc(entity::coaching_session::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(CoachingSession::from_entity)
            .collect())
    }

    /// Finds a session only if it belongs to `user_id`.
    pub async fn find_session(
        &self,
        user_id: i32,
        session_id: i32,
    ) -> Result<Option<CoachingSession>, DbErr> {
        let entity = entity::prelude::CoachingSession::find_by_id(session_id)
            .filter(entity::coaching_session::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(CoachingSession::from_entity))
    }

    /// Deletes a session and its messages.
    ///
    /// # Returns
    /// - `Ok(true)` - Session existed, belonged to the user and was deleted
    /// - `Ok(false)` - No such session for this user
    pub async fn delete_session(&self, user_id: i32, session_id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        let owned = entity::prelude::CoachingSession::find_by_id(session_id)
            .filter(entity::coaching_session::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .is_some();

        if !owned {
            txn.rollback().await?;
            return Ok(false);
        }

        entity::prelude::CoachingMessage::delete_many()
            .filter(entity::coaching_message::Column::SessionId.eq(session_id))
            .exec(&txn)
            .await?;
        entity::prelude::CoachingSession::delete_by_id(session_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(true)
    }

    /// Gets every message of a session in conversation order.
    pub async fn get_messages(&self, session_id: i32) -> Result<Vec<CoachingMessage>, AppError> {
        entity::prelude::CoachingMessage::find()
            .filter(entity::coaching_message::Column::SessionId.eq(session_id))
            .order_by_asc(entity::coaching_message::Column::CreatedAt)
            .order_by_asc(entity::coaching_message::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(CoachingMessage::from_entity)
            .collect()
    }

    /// Gets the latest `limit` messages of a session in conversation order.
    pub async fn get_recent_messages(
        &self,
        session_id: i32,
        limit: u64,
    ) -> Result<Vec<CoachingMessage>, AppError> {
        let mut messages = entity::prelude::CoachingMessage::find()
            .filter(entity::coaching_message::Column::SessionId.eq(session_id))
            .order_by_desc(entity::coaching_message::Column::CreatedAt)
            .order_by_desc(entity::coaching_message::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(CoachingMessage::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        messages.reverse();
        Ok(messages)
    }

    /// Stores a learner message and the tutor's reply, and marks the session active.
    ///
    /// # Returns
    /// - `Ok(CoachingMessage)` - The stored assistant reply
    /// - `Err(AppError::NotFound)` - Session was deleted; nothing stored
    pub async fn append_exchange(
        &self,
        session_id: i32,
        user_content: String,
        assistant_content: String,
    ) -> Result<CoachingMessage, AppError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let touched = entity::prelude::CoachingSession::update_many()
            .col_expr(
                entity::coaching_session::Column::UpdatedAt,
                Expr::value(now),
            )
            .filter(entity::coaching_session::Column::Id.eq(session_id))
            .exec(&txn)
            .await?;

        // Dropping the transaction rolls it back.
        if touched.rows_affected == 0 {
            return Err(AppError::NotFound(
                "Coaching session not found".to_string(),
            ));
        }

        insert_message(&txn, session_id, ChatRole::User, user_content, now).await?;
        let reply =
            insert_message(&txn, session_id, ChatRole::Assistant, assistant_content, now).await?;

        txn.commit().await?;

        CoachingMessage::from_entity(reply)
    }
}

async fn insert_message<C: sea_orm::ConnectionTrait>(
    db: &C,
    session_id: i32,
    role: ChatRole,
    content: String,
    created_at: DateTime<Utc>,
) -> Result<entity::coaching_message::Model, DbErr> {
    entity::coaching_message::ActiveModel {
        session_id: ActiveValue::Set(session_id),
        role: ActiveValue::Set(role.as_str().to_string()),
        content: ActiveValue::Set(content),
        created_at: ActiveValue::Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await
}
