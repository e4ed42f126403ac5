//! Vocabulary notebook and AI example sentences.

use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::server::{
    data::vocabulary::VocabularyRepository,
    error::{integration::IntegrationError, AppError},
    integration::completion::{ChatMessage, CompletionProvider},
    model::{
        page::{PageParam, Paginated},
        points::{PointReason, VOCABULARY_EXAMPLE_COST},
        user::User,
        vocabulary::{Word, WordFieldsParam},
    },
    service::points::PointsService,
};

pub const DEFAULT_DUE_LIMIT: u64 = 20;
pub const MAX_DUE_LIMIT: u64 = 100;

pub struct VocabularyService<'a> {
    db: &'a DatabaseConnection,
    completion: &'a dyn CompletionProvider,
}

impl<'a> VocabularyService<'a> {
    pub fn new(db: &'a DatabaseConnection, completion: &'a dyn CompletionProvider) -> Self {
        Self { db, completion }
    }

    fn not_found() -> AppError {
        AppError::NotFound("Word not found".to_string())
    }

    async fn ensure_unique(
        &self,
        user_id: i32,
        term: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), AppError> {
        if VocabularyRepository::new(self.db)
            .term_exists(user_id, term, exclude_id)
            .await?
        {
            return Err(duplicate_term(term));
        }

        Ok(())
    }

    /// Adds a word to the user's notebook.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Same term (ignoring case) already saved
    pub async fn create(&self, user_id: i32, param: WordFieldsParam) -> Result<Word, AppError> {
        self.ensure_unique(user_id, &param.term, None).await?;
        let term = param.term.clone();

        VocabularyRepository::new(self.db)
            .create(user_id, param)
            .await
            .map_err(|err| map_duplicate(err, &term))
    }

    pub async fn list(&self, user_id: i32, param: PageParam) -> Result<Paginated<Word>, AppError> {
        let (words, total) = VocabularyRepository::new(self.db)
            .get_by_user_paginated(user_id, param)
            .await?;

        Ok(Paginated::new(words, total, param))
    }

    /// Words due for review now, longest overdue first.
    pub async fn due(&self, user_id: i32, limit: Option<u64>) -> Result<Vec<Word>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_DUE_LIMIT).clamp(1, MAX_DUE_LIMIT);
        Ok(VocabularyRepository::new(self.db)
            .get_due(user_id, Utc::now(), limit)
            .await?)
    }

    pub async fn update(
        &self,
        user_id: i32,
        word_id: i32,
        param: WordFieldsParam,
    ) -> Result<Word, AppError> {
        self.ensure_unique(user_id, &param.term, Some(word_id))
            .await?;
        let term = param.term.clone();

        VocabularyRepository::new(self.db)
            .update(user_id, word_id, param)
            .await
            .map_err(|err| map_duplicate(err, &term))?
            .ok_or_else(Self::not_found)
    }

    pub async fn delete(&self, user_id: i32, word_id: i32) -> Result<(), AppError> {
        if !VocabularyRepository::new(self.db)
            .delete(user_id, word_id)
            .await?
        {
            return Err(Self::not_found());
        }

        Ok(())
    }

    /// Asks the model for an example sentence and stores it on the word.
    ///
    /// Costs [`VOCABULARY_EXAMPLE_COST`] points, refunded if the model call fails or
    /// the word was deleted in the meantime.
    ///
    /// # Returns
    /// - `Ok((Word, i32))` - Updated word and remaining balance
    pub async fn generate_example(
        &self,
        user: &User,
        word_id: i32,
    ) -> Result<(Word, i32), AppError> {
        let repo = VocabularyRepository::new(self.db);
        let word = repo.find(user.id, word_id).await?.ok_or_else(Self::not_found)?;
        let points = PointsService::new(self.db);

        let prompt = [
            ChatMessage::system(format!(
                "You write example sentences for English learners at the {} level. \
                 Reply with exactly one natural sentence and nothing else.",
                user.level.as_str()
            )),
            ChatMessage::user(format!(
                "Write an example sentence using \"{}\" meaning \"{}\".",
                word.term, word.meaning
            )),
        ];

        let balance = points
            .debit(user.id, VOCABULARY_EXAMPLE_COST, PointReason::VocabularyExample)
            .await?;

        let outcome = async {
            let sentence = clean_sentence(&self.completion.complete(&prompt).await?);
            if sentence.is_empty() {
                return Err(AppError::from(IntegrationError::MalformedResponse {
                    service: "example sentence",
                    reason: "empty reply".to_string(),
                }));
            }

            repo.set_example(user.id, word.id, &sentence)
                .await?
                .ok_or_else(Self::not_found)
        }
        .await;
        let word = points
            .refund_on_error(user.id, VOCABULARY_EXAMPLE_COST, outcome)
            .await?;

        Ok((word, balance))
    }
}

fn duplicate_term(term: &str) -> AppError {
    AppError::BadRequest(format!("'{}' is already in your vocabulary", term))
}

/// A concurrent insert of the same term loses on the `term_key` unique constraint.
fn map_duplicate(err: DbErr, term: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_term(term),
        _ => err.into(),
    }
}

/// Trims whitespace and surrounding quotes from a model reply.
fn clean_sentence(reply: &str) -> String {
    reply
        .trim()
        .trim_matches(|c| c == '"' || c == '\u{201c}' || c == '\u{201d}')
        .trim()
        .chars()
        .take(500)
        .collect()
}
