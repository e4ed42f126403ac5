//! Plans, point costs and ledger models.
//!
//! Every AI-backed feature consumes points from the user's monthly balance. The
//! balance refills (without carry-over) to the plan allowance at the start of
//! each UTC calendar month.

use chrono::{DateTime, Utc};

use crate::{
    model::points::{PointTransactionDto, PointsBalanceDto},
    server::error::{internal::InternalError, AppError},
};

/// Points charged for one AI coaching reply.
pub const COACHING_REPLY_COST: i32 = 2;
/// Points charged for one AI writing review.
pub const WRITING_REVIEW_COST: i32 = 5;
/// Points charged for one AI-generated vocabulary example sentence.
pub const VOCABULARY_EXAMPLE_COST: i32 = 1;

/// Subscription plan determining the monthly point allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Free,
    Standard,
    Premium,
}

impl Plan {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }

    /// Parses a plan name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Some(Self::Free),
            "standard" => Some(Self::Standard),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }

    /// Parses a plan read back from the database.
    pub fn from_stored(value: &str) -> Result<Self, AppError> {
        Self::parse(value).ok_or_else(|| {
            InternalError::UnknownStoredValue {
                column: "user.plan",
                value: value.to_string(),
            }
            .into()
        })
    }

    pub fn monthly_allowance(self) -> i32 {
        match self {
            Self::Free => 100,
            Self::Standard => 1000,
            Self::Premium => 3000,
        }
    }
}

/// Why a ledger row was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointReason {
    SignupBonus,
    CoachingReply,
    WritingReview,
    VocabularyExample,
    MonthlyReset,
    Refund,
    Subscription,
    PlanChange,
    AdminGrant(Option<String>),
}

impl PointReason {
    pub fn as_string(&self) -> String {
        match self {
            Self::SignupBonus => "signup_bonus".to_string(),
            Self::CoachingReply => "coaching_reply".to_string(),
            Self::WritingReview => "writing_review".to_string(),
            Self::VocabularyExample => "vocabulary_example".to_string(),
            Self::MonthlyReset => "monthly_reset".to_string(),
            Self::Refund => "refund".to_string(),
            Self::Subscription => "subscription".to_string(),
            Self::PlanChange => "plan_change".to_string(),
            Self::AdminGrant(None) => "admin_grant".to_string(),
            Self::AdminGrant(Some(note)) => format!("admin_grant: {}", note),
        }
    }
}

/// One row of the point ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct PointTransaction {
    pub id: i32,
    pub user_id: i32,
    pub delta: i32,
    pub reason: String,
    pub balance_after: i32,
    pub created_at: DateTime<Utc>,
}

impl PointTransaction {
    pub fn from_entity(entity: entity::point_transaction::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            delta: entity.delta,
            reason: entity.reason,
            balance_after: entity.balance_after,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> PointTransactionDto {
        PointTransactionDto {
            id: self.id,
            delta: self.delta,
            reason: self.reason,
            balance_after: self.balance_after,
            created_at: self.created_at,
        }
    }
}

/// Current balance of a user after any due monthly reset was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsBalance {
    pub points: i32,
    pub plan: Plan,
    pub reset_at: DateTime<Utc>,
}

impl PointsBalance {
    pub fn into_dto(self) -> PointsBalanceDto {
        PointsBalanceDto {
            points: self.points,
            plan: self.plan.as_str().to_string(),
            monthly_allowance: self.plan.monthly_allowance(),
            reset_at: self.reset_at,
        }
    }
}

/// Parameters for an admin point grant.
#[derive(Debug, Clone)]
pub struct GrantPointsParam {
    pub user_id: i32,
    pub amount: i32,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plan_names_case_insensitively() {
        assert_eq!(Plan::parse("Premium"), Some(Plan::Premium));
        assert_eq!(Plan::parse(" standard "), Some(Plan::Standard));
        assert_eq!(Plan::parse("gold"), None);
    }

    #[test]
    fn allowances_grow_with_plan() {
        assert!(Plan::Free.monthly_allowance() < Plan::Standard.monthly_allowance());
        assert!(Plan::Standard.monthly_allowance() < Plan::Premium.monthly_allowance());
    }

    #[test]
    fn unknown_stored_plan_is_internal_error() {
        let result = Plan::from_stored("platinum");
        assert!(matches!(
            result,
            Err(AppError::InternalErr(InternalError::UnknownStoredValue { .. }))
        ));
    }

    #[test]
    fn admin_grant_reason_includes_note() {
        assert_eq!(
            PointReason::AdminGrant(Some("contest prize".to_string())).as_string(),
            "admin_grant: contest prize"
        );
        assert_eq!(PointReason::AdminGrant(None).as_string(), "admin_grant");
    }
}
