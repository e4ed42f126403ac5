//! Coaching (AI tutor chat) domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::coaching::{
        CoachingMessageDto, CoachingSessionDto, CreateCoachingSessionDto, SendCoachingMessageDto,
    },
    server::{
        error::{internal::InternalError, AppError},
        util::validate::{optional_trimmed, trimmed_length},
    },
};

/// Title given to sessions created without a topic.
pub const DEFAULT_SESSION_TITLE: &str = "Free conversation";

/// Maximum characters accepted in a single learner message.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Number of stored messages replayed to the tutor as context.
pub const HISTORY_WINDOW: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    pub fn from_stored(value: &str) -> Result<Self, AppError> {
        match value {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(InternalError::UnknownStoredValue {
                column: "coaching_message.role",
                value: other.to_string(),
            }
            .into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoachingSession {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub topic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CoachingSession {
    pub fn from_entity(entity: entity::coaching_session::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            topic: entity.topic,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> CoachingSessionDto {
        CoachingSessionDto {
            id: self.id,
            title: self.title,
            topic: self.topic,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoachingMessage {
    pub id: i32,
    pub session_id: i32,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CoachingMessage {
    pub fn from_entity(entity: entity::coaching_message::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            session_id: entity.session_id,
            role: ChatRole::from_stored(&entity.role)?,
            content: entity.content,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> CoachingMessageDto {
        CoachingMessageDto {
            id: self.id,
            role: self.role.as_str().to_string(),
            content: self.content,
            created_at: self.created_at,
        }
    }
}

/// Validated parameters for starting a session.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSessionParam {
    pub title: String,
    pub topic: Option<String>,
}

impl CreateSessionParam {
    pub fn from_dto(dto: CreateCoachingSessionDto) -> Result<Self, AppError> {
        let topic = optional_trimmed("topic", dto.topic, 100)?;
        let title = topic
            .clone()
            .unwrap_or_else(|| DEFAULT_SESSION_TITLE.to_string());

        Ok(Self { title, topic })
    }
}

/// Validated learner message.
#[derive(Debug, Clone, PartialEq)]
pub struct SendMessageParam {
    pub content: String,
}

impl SendMessageParam {
    pub fn from_dto(dto: SendCoachingMessageDto) -> Result<Self, AppError> {
        Ok(Self {
            content: trimmed_length("content", &dto.content, 1, MAX_MESSAGE_LENGTH)?,
        })
    }
}

/// A session together with its full message history.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionWithMessages {
    pub session: CoachingSession,
    pub messages: Vec<CoachingMessage>,
}

/// Result of a successful tutor exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct CoachingReply {
    pub reply: CoachingMessage,
    pub points_remaining: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_without_topic_gets_default_title() {
        let param = CreateSessionParam::from_dto(CreateCoachingSessionDto { topic: None }).unwrap();

        assert_eq!(param.title, DEFAULT_SESSION_TITLE);
        assert_eq!(param.topic, None);
    }

    #[test]
    fn session_topic_becomes_title() {
        let param = CreateSessionParam::from_dto(CreateCoachingSessionDto {
            topic: Some(" Job interviews ".to_string()),
        })
        .unwrap();

        assert_eq!(param.title, "Job interviews");
        assert_eq!(param.topic.as_deref(), Some("Job interviews"));
    }

    #[test]
    fn rejects_overlong_message() {
        let result = SendMessageParam::from_dto(SendCoachingMessageDto {
            content: "a".repeat(MAX_MESSAGE_LENGTH + 1),
        });

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn unknown_role_is_internal_error() {
        assert!(ChatRole::from_stored("system").is_err());
        assert_eq!(ChatRole::from_stored("assistant").unwrap(), ChatRole::Assistant);
    }
}
