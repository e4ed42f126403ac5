use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const STRIPE_API_BASE_URL: &str = "https://api.stripe.com/v1";
const CLOUDINARY_API_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,

    pub oidc_client_id: String,
    pub oidc_client_secret: String,
    pub oidc_redirect_url: String,
    pub oidc_auth_url: String,
    pub oidc_token_url: String,
    pub oidc_userinfo_url: String,
    /// Emails granted admin privileges when they log in.
    pub admin_emails: Vec<String>,

    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,

    pub stripe_secret_key: String,
    pub stripe_webhook_secret: String,
    pub stripe_price_standard: String,
    pub stripe_price_premium: String,
    pub stripe_api_base_url: String,

    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
    pub cloudinary_api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let app_url = required("APP_URL")?;

        let port = match std::env::var("PORT") {
            Ok(value) => value.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                name: "PORT".to_string(),
                reason: e.to_string(),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let cors_allowed_origins = match optional("CORS_ALLOWED_ORIGINS") {
            Some(origins) => split_list(&origins),
            None => vec![app_url.clone()],
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port,
            cors_allowed_origins,
            oidc_client_id: required("OIDC_CLIENT_ID")?,
            oidc_client_secret: required("OIDC_CLIENT_SECRET")?,
            oidc_redirect_url: required("OIDC_REDIRECT_URL")?,
            oidc_auth_url: required("OIDC_AUTH_URL")?,
            oidc_token_url: required("OIDC_TOKEN_URL")?,
            oidc_userinfo_url: required("OIDC_USERINFO_URL")?,
            admin_emails: optional("ADMIN_EMAILS")
                .map(|emails| split_list(&emails.to_lowercase()))
                .unwrap_or_default(),
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_model: optional("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: optional("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            stripe_secret_key: required("STRIPE_SECRET_KEY")?,
            stripe_webhook_secret: required("STRIPE_WEBHOOK_SECRET")?,
            stripe_price_standard: required("STRIPE_PRICE_STANDARD")?,
            stripe_price_premium: required("STRIPE_PRICE_PREMIUM")?,
            stripe_api_base_url: STRIPE_API_BASE_URL.to_string(),
            cloudinary_cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
            cloudinary_api_key: required("CLOUDINARY_API_KEY")?,
            cloudinary_api_secret: required("CLOUDINARY_API_SECRET")?,
            cloudinary_api_base_url: CLOUDINARY_API_BASE_URL.to_string(),
            app_url,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Splits a comma separated list, dropping blank entries.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_blanks() {
        assert_eq!(
            split_list(" a@example.com, ,b@example.com,"),
            vec!["a@example.com".to_string(), "b@example.com".to_string()]
        );
    }

    #[test]
    fn split_list_of_empty_string_is_empty() {
        assert!(split_list("").is_empty());
    }
}
