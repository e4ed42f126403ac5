use chrono::Utc;
use oauth2::{AuthorizationCode, CsrfToken, Scope, TokenResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use url::Url;

use crate::server::{
    data::{point_transaction::PointTransactionRepository, user::UserRepository},
    error::{auth::AuthError, integration::IntegrationError, AppError},
    model::{
        points::PointReason,
        user::{UpsertUserParam, User},
    },
    state::{IdentitySettings, OAuth2Client},
    util::time::start_of_next_month,
};

/// Claims read from the OpenID Connect userinfo endpoint.
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl UserInfo {
    /// Name shown in the app: the provider's name, else the email's local part.
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| name.chars().take(50).collect())
            .unwrap_or_else(|| {
                self.email
                    .split('@')
                    .next()
                    .unwrap_or(&self.email)
                    .to_string()
            })
    }

    /// Provider profile picture, if it is an http(s) URL.
    pub fn avatar_url(&self) -> Option<String> {
        self.picture
            .as_deref()
            .map(str::trim)
            .filter(|url| url.starts_with("https://") || url.starts_with("http://"))
            .map(str::to_string)
    }
}

/// Service for the OAuth2 login flow and first-login registration.
pub struct AuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
    pub identity: &'a IdentitySettings,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        identity: &'a IdentitySettings,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            identity,
        }
    }

    /// Generates the provider login URL with CSRF protection.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - Authorization URL and the state to keep in the session
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .url()
    }

    /// Exchanges the authorization code and signs the user in.
    ///
    /// First-time users are registered on the free plan with a full balance, the
    /// provider's picture as avatar and a `signup_bonus` ledger entry. Users whose email is listed in `ADMIN_EMAILS` are
    /// granted admin.
    ///
    /// # Returns
    /// - `Ok(User)` - The signed-in user
    /// - `Err(AppError::AuthErr(TokenExchange))` - Provider rejected the code
    /// - `Err(AppError::IntegrationErr)` - Userinfo request failed
    pub async fn callback(&self, authorization_code: String) -> Result<User, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let info = self.fetch_user_info(token.access_token().secret()).await?;
        self.sign_in(info).await
    }

    /// Creates or refreshes the local user for verified identity claims.
    pub async fn sign_in(&self, info: UserInfo) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let param = UpsertUserParam {
            display_name: info.display_name(),
            avatar_url: info.avatar_url(),
            grant_admin: self.is_admin_email(&info.email),
            subject: info.sub,
            email: info.email,
        };

        if let Some(existing) = user_repo.find_by_subject(&param.subject).await? {
            return user_repo
                .update_identity(existing.id, param)
                .await?
                .ok_or(AuthError::UserNotInDatabase(existing.id).into());
        }

        let grant_admin = param.grant_admin;
        let user = user_repo
            .create(param, start_of_next_month(Utc::now()))
            .await?;

        PointTransactionRepository::new(self.db)
            .create(user.id, user.points, &PointReason::SignupBonus, user.points)
            .await?;

        tracing::info!("Registered user {} ({})", user.id, user.email);
        if grant_admin {
            tracing::info!("User {} has been set as admin", user.id);
        }

        Ok(user)
    }

    fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.identity.admin_emails.iter().any(|admin| *admin == email)
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<UserInfo, AppError> {
        let response = self
            .http_client
            .get(&self.identity.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IntegrationError::Identity(format!("userinfo returned {}", status)).into());
        }

        Ok(response.json::<UserInfo>().await?)
    }
}
