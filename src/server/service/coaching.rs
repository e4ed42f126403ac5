//! AI tutor conversations.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::coaching::CoachingRepository,
    error::AppError,
    integration::completion::{ChatMessage, CompletionProvider},
    model::{
        coaching::{
            ChatRole, CoachingMessage, CoachingReply, CoachingSession, CreateSessionParam,
            SendMessageParam, SessionWithMessages, HISTORY_WINDOW,
        },
        points::{PointReason, COACHING_REPLY_COST},
        user::{Level, User},
    },
    service::points::PointsService,
};

/// Builds the system prompt for a tutor session.
pub fn tutor_prompt(level: Level, topic: Option<&str>) -> String {
    let mut prompt = format!(
        "You are a friendly and patient English tutor chatting with a {} learner. {} \
         Keep replies under 150 words. When the learner makes a mistake, gently show \
         the corrected sentence before continuing the conversation.",
        level.as_str(),
        level.tutor_guidance()
    );

    if let Some(topic) = topic {
        prompt.push_str(&format!(" The conversation topic is: {}.", topic));
    }

    prompt
}

fn to_chat_message(message: &CoachingMessage) -> ChatMessage {
    match message.role {
        ChatRole::User => ChatMessage::user(message.content.clone()),
        ChatRole::Assistant => ChatMessage::assistant(message.content.clone()),
    }
}

pub struct CoachingService<'a> {
    db: &'a DatabaseConnection,
    completion: &'a dyn CompletionProvider,
}

impl<'a> CoachingService<'a> {
    pub fn new(db: &'a DatabaseConnection, completion: &'a dyn CompletionProvider) -> Self {
        Self { db, completion }
    }

    pub async fn create_session(
        &self,
        user_id: i32,
        param: CreateSessionParam,
    ) -> Result<CoachingSession, AppError> {
        Ok(CoachingRepository::new(self.db)
            .create_session(user_id, param)
            .await?)
    }

    pub async fn list_sessions(&self, user_id: i32) -> Result<Vec<CoachingSession>, AppError> {
        Ok(CoachingRepository::new(self.db)
            .get_sessions_by_user(user_id)
            .await?)
    }

    async fn require_session(
        &self,
        user_id: i32,
        session_id: i32,
    ) -> Result<CoachingSession, AppError> {
        CoachingRepository::new(self.db)
            .find_session(user_id, session_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Coaching session not found".to_string()))
    }

    /// Gets a session with its full transcript.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Session missing or owned by someone else
    pub async fn get_session(
        &self,
        user_id: i32,
        session_id: i32,
    ) -> Result<SessionWithMessages, AppError> {
        let session = self.require_session(user_id, session_id).await?;
        let messages = CoachingRepository::new(self.db)
            .get_messages(session.id)
            .await?;

        Ok(SessionWithMessages { session, messages })
    }

    pub async fn delete_session(&self, user_id: i32, session_id: i32) -> Result<(), AppError> {
        let deleted = CoachingRepository::new(self.db)
            .delete_session(user_id, session_id)
            .await?;

        if !deleted {
            return Err(AppError::NotFound(
                "Coaching session not found".to_string(),
            ));
        }

        Ok(())
    }

    /// Sends a learner message and returns the tutor's reply.
    ///
    /// Costs [`COACHING_REPLY_COST`] points. If the model call or storing the
    /// exchange fails the points are refunded and nothing is stored.
    ///
    /// # Returns
    /// - `Ok(CoachingReply)` - Stored reply and remaining balance
    /// - `Err(AppError::NotFound)` - Session missing, owned by someone else, or deleted
    ///   while the reply was generated (refunded)
    /// - `Err(AppError::PointsErr)` - Not enough points
    /// - `Err(AppError::IntegrationErr | ReqwestErr)` - Model call failed (refunded)
    pub async fn send_message(
        &self,
        user: &User,
        session_id: i32,
        param: SendMessageParam,
    ) -> Result<CoachingReply, AppError> {
        let session = self.require_session(user.id, session_id).await?;
        let repo = CoachingRepository::new(self.db);
        let points = PointsService::new(self.db);

        let history = repo
            .get_recent_messages(session.id, HISTORY_WINDOW)
            .await?;

        let mut prompt = Vec::with_capacity(history.len() + 2);
        prompt.push(ChatMessage::system(tutor_prompt(
            user.level,
            session.topic.as_deref(),
        )));
        prompt.extend(history.iter().map(to_chat_message));
        prompt.push(ChatMessage::user(param.content.clone()));

        let points_remaining = points
            .debit(user.id, COACHING_REPLY_COST, PointReason::CoachingReply)
            .await?;

        let outcome = async {
            let reply = self.completion.complete(&prompt).await?;
            repo.append_exchange(session.id, param.content, reply.trim().to_string())
                .await
        }
        .await;
        let reply = points
            .refund_on_error(user.id, COACHING_REPLY_COST, outcome)
            .await?;

        Ok(CoachingReply {
            reply,
            points_remaining,
        })
    }
}
