use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct QuizQuestionDto {
    pub word_id: i32,
    pub term: String,
    /// Four candidate meanings, exactly one of which is correct.
    pub options: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct QuizDto {
    pub questions: Vec<QuizQuestionDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct QuizAnswerDto {
    pub word_id: i32,
    pub answer: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct SubmitQuizDto {
    pub answers: Vec<QuizAnswerDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct QuizAnswerResultDto {
    pub word_id: i32,
    pub term: String,
    pub correct: bool,
    pub expected: String,
    pub mastery: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct QuizResultDto {
    pub attempt_id: i32,
    pub total: i32,
    pub correct: i32,
    pub results: Vec<QuizAnswerResultDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct QuizAttemptDto {
    pub id: i32,
    pub total: i32,
    pub correct: i32,
    pub created_at: DateTime<Utc>,
}
