use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    /// One of `beginner`, `intermediate`, `advanced`.
    pub level: String,
    /// One of `free`, `standard`, `premium`.
    pub plan: String,
    pub points: i32,
    pub admin: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, ToSchema)]
pub struct UpdateProfileDto {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}
