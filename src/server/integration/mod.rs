//! Clients for third-party services.
//!
//! Each client wraps the shared `reqwest::Client` and maps upstream failures to
//! `IntegrationError`, which surfaces to API callers as 502 Bad Gateway.

pub mod completion;
pub mod image_host;
pub mod stripe;
