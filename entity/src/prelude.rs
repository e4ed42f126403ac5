pub use super::coaching_message::Entity as CoachingMessage;
pub use super::coaching_session::Entity as CoachingSession;
pub use super::point_transaction::Entity as PointTransaction;
pub use super::quiz_attempt::Entity as QuizAttempt;
pub use super::user::Entity as User;
pub use super::vocabulary_word::Entity as VocabularyWord;
pub use super::writing_submission::Entity as WritingSubmission;
