use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreateWordDto {
    pub term: String,
    pub meaning: String,
    #[serde(default)]
    pub example: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UpdateWordDto {
    pub term: String,
    pub meaning: String,
    #[serde(default)]
    pub example: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct WordDto {
    pub id: i32,
    pub term: String,
    pub meaning: String,
    pub example: Option<String>,
    pub mastery: i32,
    pub next_review_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GeneratedExampleDto {
    pub word: WordDto,
    pub points_remaining: i32,
}
