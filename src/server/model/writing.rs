//! Writing practice domain models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    model::writing::{SubmitWritingDto, WritingSubmissionDto},
    server::{
        error::{integration::IntegrationError, AppError},
        util::validate::{optional_trimmed, trimmed_length},
    },
};

const MIN_TEXT_LENGTH: usize = 10;
const MAX_TEXT_LENGTH: usize = 5000;
const MAX_PROMPT_LENGTH: usize = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct WritingSubmission {
    pub id: i32,
    pub user_id: i32,
    pub prompt: Option<String>,
    pub original_text: String,
    pub corrected_text: String,
    pub feedback: String,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

impl WritingSubmission {
    pub fn from_entity(entity: entity::writing_submission::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            prompt: entity.prompt,
            original_text: entity.original_text,
            corrected_text: entity.corrected_text,
            feedback: entity.feedback,
            score: entity.score,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> WritingSubmissionDto {
        WritingSubmissionDto {
            id: self.id,
            prompt: self.prompt,
            original_text: self.original_text,
            corrected_text: self.corrected_text,
            feedback: self.feedback,
            score: self.score,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitWritingParam {
    pub prompt: Option<String>,
    pub text: String,
}

impl SubmitWritingParam {
    pub fn from_dto(dto: SubmitWritingDto) -> Result<Self, AppError> {
        Ok(Self {
            prompt: optional_trimmed("prompt", dto.prompt, MAX_PROMPT_LENGTH)?,
            text: trimmed_length("text", &dto.text, MIN_TEXT_LENGTH, MAX_TEXT_LENGTH)?,
        })
    }
}

/// Correction returned by the AI reviewer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WritingReview {
    pub corrected_text: String,
    pub feedback: String,
    pub score: i64,
}

impl WritingReview {
    /// Parses the reviewer's answer.
    ///
    /// Models sometimes wrap JSON in a Markdown code fence, so anything outside the
    /// outermost braces is ignored. The score is clamped to 0..=100.
    pub fn parse(raw: &str) -> Result<Self, IntegrationError> {
        let malformed = |reason: String| IntegrationError::MalformedResponse {
            service: "writing review",
            reason,
        };

        let start = raw
            .find('{')
            .ok_or_else(|| malformed("no JSON object in reply".to_string()))?;
        let end = raw
            .rfind('}')
            .filter(|end| *end > start)
            .ok_or_else(|| malformed("unterminated JSON object in reply".to_string()))?;

        let mut review: WritingReview =
            serde_json::from_str(&raw[start..=end]).map_err(|e| malformed(e.to_string()))?;

        if review.corrected_text.trim().is_empty() {
            return Err(malformed("empty corrected_text".to_string()));
        }

        review.score = review.score.clamp(0, 100);
        Ok(review)
    }
}

/// Stored submission plus the caller's remaining balance.
#[derive(Debug, Clone, PartialEq)]
pub struct WritingReviewResult {
    pub submission: WritingSubmission,
    pub points_remaining: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json_review() {
        let review = WritingReview::parse(
            r#"{"corrected_text": "I went home.", "feedback": "Use past tense.", "score": 72}"#,
        )
        .unwrap();

        assert_eq!(review.corrected_text, "I went home.");
        assert_eq!(review.score, 72);
    }

    #[test]
    fn parses_fenced_json_and_clamps_score() {
        let raw = "```json\n{\"corrected_text\": \"Hi.\", \"feedback\": \"Good\", \"score\": 140}\n```";
        let review = WritingReview::parse(raw).unwrap();

        assert_eq!(review.score, 100);
    }

    #[test]
    fn rejects_prose_reply() {
        let result = WritingReview::parse("Sorry, I cannot help with that.");
        assert!(matches!(
            result,
            Err(IntegrationError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn rejects_short_text() {
        let result = SubmitWritingParam::from_dto(SubmitWritingDto {
            prompt: None,
            text: "too short".to_string(),
        });

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
