//! User service for profile and account queries.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        page::{PageParam, Paginated},
        user::{UpdateProfileParam, User},
    },
};

pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user by id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    pub async fn get_user(&self, user_id: i32) -> Result<Option<User>, AppError> {
        UserRepository::new(self.db).find_by_id(user_id).await
    }

    /// Applies a validated profile update.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated profile
    /// - `Err(AppError::NotFound)` - User no longer exists
    pub async fn update_profile(
        &self,
        user_id: i32,
        param: UpdateProfileParam,
    ) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .update_profile(user_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Retrieves all users with pagination, ordered by id.
    pub async fn get_all_users(&self, param: PageParam) -> Result<Paginated<User>, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_all_paginated(param)
            .await?;

        Ok(Paginated::new(users, total, param))
    }
}
