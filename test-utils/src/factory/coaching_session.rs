//! Coaching session factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct SessionFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    title: String,
    topic: Option<String>,
    updated_at: DateTime<Utc>,
}

impl<'a> SessionFactory<'a> {
    /// Defaults to an untitled free conversation updated now.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            title: "Free conversation".to_string(),
            topic: None,
            updated_at: Utc::now(),
        }
    }

    /// Sets the topic and uses it as the title.
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        let topic = topic.into();
        self.title = topic.clone();
        self.topic = Some(topic);
        self
    }

    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub async fn build(self) -> Result<entity::coaching_session::Model, DbErr> {
        entity::coaching_session::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            title: ActiveValue::Set(self.title),
            topic: ActiveValue::Set(self.topic),
            created_at: ActiveValue::Set(self.updated_at),
            updated_at: ActiveValue::Set(self.updated_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a session owned by `user_id` with default values.
pub async fn create_session(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::coaching_session::Model, DbErr> {
    SessionFactory::new(db, user_id).build().await
}
