use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PointsBalanceDto {
    pub points: i32,
    pub plan: String,
    pub monthly_allowance: i32,
    /// When the balance is next refilled to the monthly allowance.
    pub reset_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PointTransactionDto {
    pub id: i32,
    pub delta: i32,
    pub reason: String,
    pub balance_after: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GrantPointsDto {
    pub amount: i32,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct SetPlanDto {
    pub plan: String,
}
