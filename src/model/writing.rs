use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct SubmitWritingDto {
    #[serde(default)]
    pub prompt: Option<String>,
    pub text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct WritingSubmissionDto {
    pub id: i32,
    pub prompt: Option<String>,
    pub original_text: String,
    pub corrected_text: String,
    pub feedback: String,
    /// 0 to 100.
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct WritingReviewDto {
    pub submission: WritingSubmissionDto,
    pub points_remaining: i32,
}
