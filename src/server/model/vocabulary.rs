//! Vocabulary domain models and spaced repetition schedule.

use chrono::{DateTime, Duration, Utc};

use crate::{
    model::vocabulary::{CreateWordDto, UpdateWordDto, WordDto},
    server::{
        error::AppError,
        util::validate::{optional_trimmed, trimmed_length},
    },
};

/// Highest mastery level a word can reach.
pub const MAX_MASTERY: i32 = 5;

/// Days until the next review, indexed by mastery level.
const REVIEW_INTERVAL_DAYS: [i64; 6] = [0, 1, 3, 7, 14, 30];

const MAX_TERM_LENGTH: usize = 100;
const MAX_MEANING_LENGTH: usize = 500;
const MAX_EXAMPLE_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub id: i32,
    pub user_id: i32,
    pub term: String,
    pub meaning: String,
    pub example: Option<String>,
    pub mastery: i32,
    pub next_review_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Word {
    pub fn from_entity(entity: entity::vocabulary_word::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            term: entity.term,
            meaning: entity.meaning,
            example: entity.example,
            mastery: entity.mastery,
            next_review_at: entity.next_review_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> WordDto {
        WordDto {
            id: self.id,
            term: self.term,
            meaning: self.meaning,
            example: self.example,
            mastery: self.mastery,
            next_review_at: self.next_review_at,
        }
    }
}

/// Validated fields of a word, shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct WordFieldsParam {
    pub term: String,
    pub meaning: String,
    pub example: Option<String>,
}

impl WordFieldsParam {
    fn validate(term: &str, meaning: &str, example: Option<String>) -> Result<Self, AppError> {
        Ok(Self {
            term: trimmed_length("term", term, 1, MAX_TERM_LENGTH)?,
            meaning: trimmed_length("meaning", meaning, 1, MAX_MEANING_LENGTH)?,
            example: optional_trimmed("example", example, MAX_EXAMPLE_LENGTH)?,
        })
    }

    pub fn from_create_dto(dto: CreateWordDto) -> Result<Self, AppError> {
        Self::validate(&dto.term, &dto.meaning, dto.example)
    }

    pub fn from_update_dto(dto: UpdateWordDto) -> Result<Self, AppError> {
        Self::validate(&dto.term, &dto.meaning, dto.example)
    }
}

/// New mastery level and review time after answering a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub mastery: i32,
    pub next_review_at: DateTime<Utc>,
}

/// Applies one quiz answer to a word's spaced repetition state.
///
/// A correct answer raises mastery by one (capped at [`MAX_MASTERY`]); a wrong answer
/// drops it back to zero, which makes the word due immediately.
pub fn review_outcome(mastery: i32, correct: bool, now: DateTime<Utc>) -> ReviewOutcome {
    let mastery = if correct {
        (mastery + 1).clamp(0, MAX_MASTERY)
    } else {
        0
    };

    let days = REVIEW_INTERVAL_DAYS[mastery as usize];

    ReviewOutcome {
        mastery,
        next_review_at: now + Duration::days(days),
    }
}
