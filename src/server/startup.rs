use axum::http::{header, HeaderValue, Method};
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_http::cors::CorsLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    state::OAuth2Client,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application's Sqlite pool.
///
/// Sessions expire after 7 days of inactivity. Cookies are marked secure when the
/// application is served over HTTPS.
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());
    session_store.migrate().await?;

    let secure = config.app_url.starts_with("https://");

    Ok(SessionManagerLayer::new(session_store)
        .with_secure(secure)
        .with_expiry(Expiry::OnInactivity(Duration::days(7))))
}

/// Builds the shared outbound HTTP client.
///
/// Redirects are disabled so a compromised upstream cannot bounce requests to
/// internal addresses.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the OAuth2 client for the configured identity provider.
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let auth_url = AuthUrl::new(config.oidc_auth_url.clone()).map_err(|e| {
        ConfigError::InvalidUrl {
            name: "OIDC_AUTH_URL".to_string(),
            source: e,
        }
    })?;
    let token_url = TokenUrl::new(config.oidc_token_url.clone()).map_err(|e| {
        ConfigError::InvalidUrl {
            name: "OIDC_TOKEN_URL".to_string(),
            source: e,
        }
    })?;
    let redirect_url = RedirectUrl::new(config.oidc_redirect_url.clone()).map_err(|e| {
        ConfigError::InvalidUrl {
            name: "OIDC_REDIRECT_URL".to_string(),
            source: e,
        }
    })?;

    Ok(BasicClient::new(ClientId::new(config.oidc_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.oidc_client_secret.clone()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url))
}

/// Builds the CORS layer from the configured origin list.
///
/// Credentials are allowed because the API authenticates with session cookies.
pub fn setup_cors(config: &Config) -> CorsLayer {
    let allowed_origins = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
