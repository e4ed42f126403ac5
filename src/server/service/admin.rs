//! Administrative account management.

use sea_orm::DatabaseConnection;

use crate::server::{
    error::AppError,
    model::{
        page::{PageParam, Paginated},
        points::{GrantPointsParam, Plan, PointReason},
        user::User,
    },
    service::{points::PointsService, user::UserService},
};

const MAX_NOTE_LENGTH: usize = 200;

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_users(&self, param: PageParam) -> Result<Paginated<User>, AppError> {
        UserService::new(self.db).get_all_users(param).await
    }

    /// Credits points to a user, recording an optional note in the ledger.
    ///
    /// # Returns
    /// - `Ok(i32)` - Balance after the grant
    /// - `Err(AppError::BadRequest)` - Amount out of range or note too long
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn grant_points(
        &self,
        user_id: i32,
        amount: i32,
        note: Option<String>,
    ) -> Result<i32, AppError> {
        let note = note
            .map(|note| note.trim().to_string())
            .filter(|note| !note.is_empty());
        if note
            .as_ref()
            .is_some_and(|note| note.chars().count() > MAX_NOTE_LENGTH)
        {
            return Err(AppError::BadRequest(format!(
                "reason must be at most {} characters",
                MAX_NOTE_LENGTH
            )));
        }

        PointsService::new(self.db)
            .grant(GrantPointsParam {
                user_id,
                amount,
                note,
            })
            .await
    }

    /// Moves a user to another plan and refills their balance to its allowance.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Unknown plan name
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn set_plan(&self, user_id: i32, plan: &str) -> Result<User, AppError> {
        let plan = Plan::parse(plan)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown plan '{}'", plan)))?;

        PointsService::new(self.db)
            .apply_plan(user_id, plan, PointReason::PlanChange)
            .await
    }
}
