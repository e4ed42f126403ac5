//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//! Queries on learner-owned rows always filter by owner, so a foreign id is
//! indistinguishable from a missing one.

pub mod coaching;
pub mod point_transaction;
pub mod quiz_attempt;
pub mod user;
pub mod vocabulary;
pub mod writing;

#[cfg(test)]
mod test;
