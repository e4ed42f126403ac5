//! User domain models and parameters.
//!
//! Provides the domain model for learners authenticated through the identity
//! provider, together with their plan, point balance and billing identifiers.

use chrono::{DateTime, Utc};

use crate::{
    model::user::{UpdateProfileDto, UserDto},
    server::{
        error::{internal::InternalError, AppError},
        model::points::Plan,
        util::validate::trimmed_length,
    },
};

/// Self-reported English level used to tune AI tutor prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// How the tutor should pitch its language for this level.
    pub fn tutor_guidance(self) -> &'static str {
        match self {
            Self::Beginner => {
                "Use short sentences and common everyday words. Explain any new word you introduce."
            }
            Self::Intermediate => {
                "Use natural conversational English and occasionally introduce useful idioms."
            }
            Self::Advanced => {
                "Speak as you would to a fluent speaker and point out subtle nuances in word choice."
            }
        }
    }
}

/// Application user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Stable subject identifier issued by the identity provider.
    pub subject: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub level: Level,
    pub admin: bool,
    pub plan: Plan,
    pub points: i32,
    /// End of the current point period.
    pub points_reset_at: DateTime<Utc>,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub subscription_status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            level: self.level.as_str().to_string(),
            plan: self.plan.as_str().to_string(),
            points: self.points,
            admin: self.admin,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(UnknownStoredValue))` - Stored plan or level is not
    ///   a known value
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let level = Level::parse(&entity.level).ok_or_else(|| InternalError::UnknownStoredValue {
            column: "user.level",
            value: entity.level.clone(),
        })?;

        Ok(Self {
            id: entity.id,
            subject: entity.subject,
            email: entity.email,
            display_name: entity.display_name,
            avatar_url: entity.avatar_url,
            level,
            admin: entity.admin,
            plan: Plan::from_stored(&entity.plan)?,
            points: entity.points,
            points_reset_at: entity.points_reset_at,
            stripe_customer_id: entity.stripe_customer_id,
            stripe_subscription_id: entity.stripe_subscription_id,
            subscription_status: entity.subscription_status,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for creating or refreshing a user after a successful login.
///
/// New users are registered on the free plan with a full balance. Existing users
/// only have their identity fields refreshed; `grant_admin` can promote but never
/// demote. `avatar_url` is only used at registration so an uploaded avatar is kept.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    pub subject: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub grant_admin: bool,
}

/// Validated profile changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProfileParam {
    pub display_name: Option<String>,
    pub level: Option<Level>,
}

impl UpdateProfileParam {
    /// Validates a profile update request.
    ///
    /// # Returns
    /// - `Ok(UpdateProfileParam)` - Display name trimmed to 1..=50 chars, level parsed
    /// - `Err(AppError::BadRequest)` - Invalid display name or unknown level
    pub fn from_dto(dto: UpdateProfileDto) -> Result<Self, AppError> {
        let display_name = match dto.display_name {
            Some(name) => Some(trimmed_length("display_name", &name, 1, 50)?),
            None => None,
        };

        let level = match dto.level {
            Some(level) => Some(Level::parse(&level).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Unknown level '{}', expected beginner, intermediate or advanced",
                    level
                ))
            })?),
            None => None,
        };

        Ok(Self {
            display_name,
            level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_update_trims_name_and_parses_level() {
        let param = UpdateProfileParam::from_dto(UpdateProfileDto {
            display_name: Some("  Aiko  ".to_string()),
            level: Some("Advanced".to_string()),
        })
        .unwrap();

        assert_eq!(param.display_name.as_deref(), Some("Aiko"));
        assert_eq!(param.level, Some(Level::Advanced));
    }

    #[test]
    fn profile_update_rejects_unknown_level() {
        let result = UpdateProfileParam::from_dto(UpdateProfileDto {
            display_name: None,
            level: Some("expert".to_string()),
        });

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn profile_update_rejects_blank_name() {
        let result = UpdateProfileParam::from_dto(UpdateProfileDto {
            display_name: Some("   ".to_string()),
            level: None,
        });

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
