//! Quiz domain models.

use chrono::{DateTime, Utc};

use crate::model::quiz::{
    QuizAnswerResultDto, QuizAttemptDto, QuizQuestionDto, QuizResultDto, SubmitQuizDto,
};

/// Options shown per question (one correct plus distractors).
pub const OPTIONS_PER_QUESTION: usize = 4;
pub const DEFAULT_QUESTION_COUNT: usize = 10;
pub const MAX_QUESTION_COUNT: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    pub word_id: i32,
    pub term: String,
    pub options: Vec<String>,
}

impl QuizQuestion {
    pub fn into_dto(self) -> QuizQuestionDto {
        QuizQuestionDto {
            word_id: self.word_id,
            term: self.term,
            options: self.options,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizAnswerParam {
    pub word_id: i32,
    pub answer: String,
}

impl QuizAnswerParam {
    pub fn from_dto(dto: SubmitQuizDto) -> Vec<Self> {
        dto.answers
            .into_iter()
            .map(|a| Self {
                word_id: a.word_id,
                answer: a.answer,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradedAnswer {
    pub word_id: i32,
    pub term: String,
    pub correct: bool,
    pub expected: String,
    pub mastery: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub attempt_id: i32,
    pub total: i32,
    pub correct: i32,
    pub results: Vec<GradedAnswer>,
}

impl QuizResult {
    pub fn into_dto(self) -> QuizResultDto {
        QuizResultDto {
            attempt_id: self.attempt_id,
            total: self.total,
            correct: self.correct,
            results: self
                .results
                .into_iter()
                .map(|r| QuizAnswerResultDto {
                    word_id: r.word_id,
                    term: r.term,
                    correct: r.correct,
                    expected: r.expected,
                    mastery: r.mastery,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizAttempt {
    pub id: i32,
    pub user_id: i32,
    pub total: i32,
    pub correct: i32,
    pub created_at: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn from_entity(entity: entity::quiz_attempt::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            total: entity.total,
            correct: entity.correct,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> QuizAttemptDto {
        QuizAttemptDto {
            id: self.id,
            total: self.total,
            correct: self.correct,
            created_at: self.created_at,
        }
    }
}
