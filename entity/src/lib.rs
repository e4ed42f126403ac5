//! SeaORM entity definitions for the lexicoach database schema.

pub mod prelude;

pub mod coaching_message;
pub mod coaching_session;
pub mod point_transaction;
pub mod quiz_attempt;
pub mod user;
pub mod vocabulary_word;
pub mod writing_submission;
