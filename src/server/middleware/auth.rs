use chrono::Utc;
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::User,
    service::points::PointsService,
};

pub enum Permission {
    Admin,
}

/// Resolves the logged-in user and checks their permissions.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Returns the session's user if they hold every permission in `permissions`.
    ///
    /// A monthly points reset that came due since the last request is applied
    /// before the user is returned.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated and authorized
    /// - `Err(AuthError::UserNotInSession)` - Not logged in (401)
    /// - `Err(AuthError::UserNotInDatabase)` - Session refers to a deleted user (401)
    /// - `Err(AuthError::AccessDenied)` - Missing a permission (403)
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.admin {
                        return Err(AuthError::AccessDenied(
                            user_id,
                            "Admin permission required".to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        PointsService::new(self.db).reset_if_due(user, Utc::now()).await
    }
}
