//! Vocabulary word repository.
//!
//! Every query is scoped by owner; a word id belonging to another user behaves
//! exactly like a missing one.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::{
    page::PageParam,
    vocabulary::{ReviewOutcome, Word, WordFieldsParam},
};

pub struct VocabularyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VocabularyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a word, due for review immediately.
    ///
    /// # Returns
    /// - `Err(DbErr)` - Unique violation on `term_key` when the user already has the term
    pub async fn create(&self, user_id: i32, param: WordFieldsParam) -> Result<Word, DbErr> {
        let now = Utc::now();
        let entity = entity::vocabulary_word::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            term_key: ActiveValue::Set(entity::vocabulary_word::term_key(user_id, &param.term)),
            term: ActiveValue::Set(param.term),
            meaning: ActiveValue::Set(param.meaning),
            example: ActiveValue::Set(param.example),
            mastery: ActiveValue::Set(0),
            next_review_at: ActiveValue::Set(now),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Word::from_entity(entity))
    }

    /// Checks whether the user already has `term`, ignoring case.
    ///
    /// # Arguments
    /// - `exclude_id` - Word to ignore, used when renaming a word to a new casing of itself
    pub async fn term_exists(
        &self,
        user_id: i32,
        term: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::VocabularyWord::find()
            .filter(entity::vocabulary_word::Column::UserId.eq(user_id))
            .filter(
                entity::vocabulary_word::Column::TermKey
                    .eq(entity::vocabulary_word::term_key(user_id, term)),
            );

        if let Some(id) = exclude_id {
            query = query.filter(entity::vocabulary_word::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    pub async fn find(&self, user_id: i32, word_id: i32) -> Result<Option<Word>, DbErr> {
        let entity = entity::prelude::VocabularyWord::find_by_id(word_id)
            .filter(entity::vocabulary_word::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Word::from_entity))
    }

    /// Gets the user's words among `word_ids`; ids of other users are skipped.
    pub async fn find_many(&self, user_id: i32, word_ids: &[i32]) -> Result<Vec<Word>, DbErr> {
        if word_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::VocabularyWord::find()
            .filter(entity::vocabulary_word::Column::UserId.eq(user_id))
            .filter(entity::vocabulary_word::Column::Id.is_in(word_ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Word::from_entity).collect())
    }

    /// Gets a page of the user's words in alphabetical order.
    pub async fn get_by_user_paginated(
        &self,
        user_id: i32,
        param: PageParam,
    ) -> Result<(Vec<Word>, u64), DbErr> {
        let paginator = entity::prelude::VocabularyWord::find()
            .filter(entity::vocabulary_word::Column::UserId.eq(user_id))
            .order_by_asc(entity::vocabulary_word::Column::Term)
            .order_by_asc(entity::vocabulary_word::Column::Id)
            .paginate(self.db, param.per_page);

        let total = paginator.num_items().await?;
        let words = paginator
            .fetch_page(param.page)
            .await?
            .into_iter()
            .map(Word::from_entity)
            .collect();

        Ok((words, total))
    }

    /// Gets words due for review at `now`, longest overdue first.
    pub async fn get_due(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Word>, DbErr> {
        let entities = entity::prelude::VocabularyWord::find()
            .filter(entity::vocabulary_word::Column::UserId.eq(user_id))
            .filter(entity::vocabulary_word::Column::NextReviewAt.lte(now))
            .order_by_asc(entity::vocabulary_word::Column::NextReviewAt)
            .order_by_asc(entity::vocabulary_word::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Word::from_entity).collect())
    }

    /// Gets all of the user's words, due ones first.
    ///
    /// Within the due and the not-yet-due group, words are ordered by lowest mastery,
    /// then soonest review.
    pub async fn get_all_by_review_order(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<Word>, DbErr> {
        let mut entities = self
            .find_by_mastery(
                user_id,
                entity::vocabulary_word::Column::NextReviewAt.lte(now),
            )
            .await?;
        entities.extend(
            self.find_by_mastery(
                user_id,
                entity::vocabulary_word::Column::NextReviewAt.gt(now),
            )
            .await?,
        );

        Ok(entities.into_iter().map(Word::from_entity).collect())
    }

    async fn find_by_mastery(
        &self,
        user_id: i32,
        condition: impl sea_orm::sea_query::IntoCondition,
    ) -> Result<Vec<entity::vocabulary_word::Model>, DbErr> {
        entity::prelude::VocabularyWord::find()
            .filter(entity::vocabulary_word::Column::UserId.eq(user_id))
            .filter(condition)
            .order_by_asc(entity::vocabulary_word::Column::Mastery)
            .order_by_asc(entity::vocabulary_word::Column::NextReviewAt)
            .order_by_asc(entity::vocabulary_word::Column::Id)
            .all(self.db)
            .await
    }

    /// Replaces term, meaning and example of an owned word.
    pub async fn update(
        &self,
        user_id: i32,
        word_id: i32,
        param: WordFieldsParam,
    ) -> Result<Option<Word>, DbErr> {
        let updated = entity::prelude::VocabularyWord::update_many()
            .col_expr(
                entity::vocabulary_word::Column::TermKey,
                Expr::value(entity::vocabulary_word::term_key(user_id, &param.term)),
            )
            .col_expr(entity::vocabulary_word::Column::Term, Expr::value(param.term))
            .col_expr(
                entity::vocabulary_word::Column::Meaning,
                Expr::value(param.meaning),
            )
            .col_expr(
                entity::vocabulary_word::Column::Example,
                Expr::value(param.example),
            )
            .filter(entity::vocabulary_word::Column::Id.eq(word_id))
            .filter(entity::vocabulary_word::Column::UserId.eq(user_id))
            .exec_with_returning(self.db)
            .await?;

        Ok(updated.into_iter().next().map(Word::from_entity))
    }

    pub async fn set_example(
        &self,
        user_id: i32,
        word_id: i32,
        example: &str,
    ) -> Result<Option<Word>, DbErr> {
        let updated = entity::prelude::VocabularyWord::update_many()
            .col_expr(
                entity::vocabulary_word::Column::Example,
                Expr::value(example),
            )
            .filter(entity::vocabulary_word::Column::Id.eq(word_id))
            .filter(entity::vocabulary_word::Column::UserId.eq(user_id))
            .exec_with_returning(self.db)
            .await?;

        Ok(updated.into_iter().next().map(Word::from_entity))
    }

    /// Stores the spaced repetition state after a quiz answer.
    pub async fn apply_review(&self, word_id: i32, outcome: ReviewOutcome) -> Result<(), DbErr> {
        entity::prelude::VocabularyWord::update_many()
            .col_expr(
                entity::vocabulary_word::Column::Mastery,
                Expr::value(outcome.mastery),
            )
            .col_expr(
                entity::vocabulary_word::Column::NextReviewAt,
                Expr::value(outcome.next_review_at),
            )
            .filter(entity::vocabulary_word::Column::Id.eq(word_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes an owned word.
    ///
    /// # Returns
    /// - `Ok(true)` - Word deleted
    /// - `Ok(false)` - No such word for this user
    pub async fn delete(&self, user_id: i32, word_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::VocabularyWord::delete_many()
            .filter(entity::vocabulary_word::Column::Id.eq(word_id))
            .filter(entity::vocabulary_word::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
