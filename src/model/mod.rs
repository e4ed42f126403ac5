//! Wire-level DTOs shared by every API endpoint.
//!
//! These types define the JSON request and response bodies of the HTTP API and
//! carry `utoipa::ToSchema` derives for the generated OpenAPI document. They hold
//! no business logic; the server converts domain models into them at the
//! controller boundary.

pub mod api;
pub mod billing;
pub mod coaching;
pub mod points;
pub mod quiz;
pub mod user;
pub mod vocabulary;
pub mod writing;
