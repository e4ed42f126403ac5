mod model;
mod server;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::AppError,
    integration::{
        completion::OpenAiClient,
        image_host::{ImageHostClient, ImageHostSettings},
        stripe::{StripeClient, StripeSettings},
    },
    scheduler::points_reset,
    startup,
    state::{AppState, IdentitySettings},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;

    let completion = Arc::new(OpenAiClient::new(
        http_client.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
        config.openai_base_url.clone(),
    ));
    let stripe = StripeClient::new(
        http_client.clone(),
        StripeSettings {
            secret_key: config.stripe_secret_key.clone(),
            webhook_secret: config.stripe_webhook_secret.clone(),
            price_standard: config.stripe_price_standard.clone(),
            price_premium: config.stripe_price_premium.clone(),
            api_base_url: config.stripe_api_base_url.clone(),
        },
    );
    let image_host = ImageHostClient::new(
        http_client.clone(),
        ImageHostSettings {
            cloud_name: config.cloudinary_cloud_name.clone(),
            api_key: config.cloudinary_api_key.clone(),
            api_secret: config.cloudinary_api_secret.clone(),
            api_base_url: config.cloudinary_api_base_url.clone(),
        },
    );

    let _scheduler = points_reset::start_scheduler(db.clone()).await?;

    let state = AppState::new(
        db,
        http_client,
        oauth_client,
        IdentitySettings {
            userinfo_url: config.oidc_userinfo_url.clone(),
            admin_emails: config.admin_emails.clone(),
        },
        completion,
        stripe,
        image_host,
        config.app_url.clone(),
    );

    let app = server::router::router()
        .with_state(state)
        .layer(session)
        .layer(startup::setup_cors(&config));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
