//! Server-side API backend and business logic.
//!
//! # Architecture
//!
//! The server follows a layered architecture:
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business logic and point metering around AI calls
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session wrappers and authentication guards
//! - **Integration** (`integration/`) - Clients for the AI provider, Stripe and Cloudinary
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, HTTP clients, integrations)
//! - **Startup** (`startup`) - Initialization of database, sessions, and clients
//! - **Router** (`router`) - Route table and OpenAPI documentation
//! - **Scheduler** (`scheduler/`) - Monthly points reset job
//!
//! # Request Flow
//!
//! 1. **Router** routes the request to a controller
//! 2. **Controller** authenticates via `AuthGuard`, converts the DTO to a param
//! 3. **Service** validates against the database, debits points, calls integrations
//! 4. **Data** queries the database and converts entities to domain models
//! 5. **Controller** converts the domain model to a DTO response

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod integration;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
