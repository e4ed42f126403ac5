//! HTTP handlers.
//!
//! Handlers authenticate through `AuthGuard`, convert DTOs into validated params,
//! call a service and convert the domain result back into a DTO.

pub mod admin;
pub mod auth;
pub mod billing;
pub mod coaching;
pub mod health;
pub mod param;
pub mod points;
pub mod quiz;
pub mod user;
pub mod vocabulary;
pub mod writing;
