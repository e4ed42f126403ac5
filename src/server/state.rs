//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - HTTP client and OAuth2 client for the identity provider
//! - AI completion provider used by coaching, writing and vocabulary examples
//! - Stripe and image hosting clients

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::integration::{
    completion::CompletionProvider, image_host::ImageHostClient, stripe::StripeClient,
};

/// Type alias for the OAuth2 client configured for the identity provider.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Settings for the login flow that are not part of the OAuth2 client itself.
#[derive(Clone)]
pub struct IdentitySettings {
    /// Endpoint returning the OpenID Connect userinfo document.
    pub userinfo_url: String,
    /// Lowercased emails granted admin privileges on login.
    pub admin_emails: Vec<String>,
}

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` uses an `Arc` internally
/// - `OAuth2Client` is designed to be cloned
/// - integration clients are `Arc`s or wrap a `reqwest::Client`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for making external API requests.
    ///
    /// Configured without redirects to prevent SSRF through redirected responses.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the identity provider login flow.
    pub oauth_client: OAuth2Client,

    /// Userinfo endpoint and admin email list used on login.
    pub identity: IdentitySettings,

    /// AI completion provider used by every point-metered feature.
    pub completion: Arc<dyn CompletionProvider>,

    /// Stripe REST client for checkout, portal and webhook verification.
    pub stripe: StripeClient,

    /// Image hosting client for profile pictures.
    pub image_host: ImageHostClient,

    /// Application base URL used for redirects after login and checkout.
    pub app_url: String,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        identity: IdentitySettings,
        completion: Arc<dyn CompletionProvider>,
        stripe: StripeClient,
        image_host: ImageHostClient,
        app_url: String,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            identity,
            completion,
            stripe,
            image_host,
            app_url,
        }
    }
}
