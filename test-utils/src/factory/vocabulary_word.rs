//! Vocabulary word factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct WordFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    term: String,
    meaning: String,
    example: Option<String>,
    mastery: i32,
    next_review_at: DateTime<Utc>,
}

impl<'a> WordFactory<'a> {
    /// Defaults to a unique `word-{id}` / `meaning-{id}` pair at mastery 0, due now.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            term: format!("word-{}", id),
            meaning: format!("meaning-{}", id),
            example: None,
            mastery: 0,
            next_review_at: Utc::now(),
        }
    }

    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = meaning.into();
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn mastery(mut self, mastery: i32) -> Self {
        self.mastery = mastery;
        self
    }

    pub fn next_review_at(mut self, next_review_at: DateTime<Utc>) -> Self {
        self.next_review_at = next_review_at;
        self
    }

    pub async fn build(self) -> Result<entity::vocabulary_word::Model, DbErr> {
        entity::vocabulary_word::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            term_key: ActiveValue::Set(entity::vocabulary_word::term_key(self.user_id, &self.term)),
            term: ActiveValue::Set(self.term),
            meaning: ActiveValue::Set(self.meaning),
            example: ActiveValue::Set(self.example),
            mastery: ActiveValue::Set(self.mastery),
            next_review_at: ActiveValue::Set(self.next_review_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a word owned by `user_id` with default values.
pub async fn create_word(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::vocabulary_word::Model, DbErr> {
    WordFactory::new(db, user_id).build().await
}
