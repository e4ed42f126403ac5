//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` builder for customization
//! and a `create_*` convenience function for quick default creation. Unique fields are
//! derived from a shared counter so factories can be called repeatedly in one test.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::create_user(&db).await?;
//! let word = factory::vocabulary_word::WordFactory::new(&db, user.id)
//!     .term("ephemeral")
//!     .mastery(3)
//!     .build()
//!     .await?;
//! ```

pub mod coaching_session;
pub mod helpers;
pub mod user;
pub mod vocabulary_word;

pub use coaching_session::create_session;
pub use user::create_user;
pub use vocabulary_word::create_word;
