//! Business logic between the controllers and the repositories.
//!
//! Services own validation that needs the database, point metering around AI calls
//! and calls to third-party integrations.

pub mod admin;
pub mod auth;
pub mod billing;
pub mod coaching;
pub mod points;
pub mod quiz;
pub mod upload;
pub mod user;
pub mod vocabulary;
pub mod writing;
