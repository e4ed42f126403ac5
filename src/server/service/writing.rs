//! AI writing correction.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::writing::WritingRepository,
    error::AppError,
    integration::completion::{ChatMessage, CompletionProvider},
    model::{
        page::{PageParam, Paginated},
        points::{PointReason, WRITING_REVIEW_COST},
        user::User,
        writing::{SubmitWritingParam, WritingReview, WritingReviewResult, WritingSubmission},
    },
    service::points::PointsService,
};

const REVIEWER_PROMPT: &str = "You are an English writing teacher. Correct the learner's \
text and answer with a single JSON object and nothing else, using exactly these keys: \
\"corrected_text\" (the full corrected text), \"feedback\" (a short explanation of the \
main mistakes, written for the learner) and \"score\" (an integer from 0 to 100 rating \
the original text).";

fn review_request(user: &User, param: &SubmitWritingParam) -> Vec<ChatMessage> {
    let mut system = format!(
        "{} The learner's level is {}.",
        REVIEWER_PROMPT,
        user.level.as_str()
    );
    if let Some(prompt) = &param.prompt {
        system.push_str(&format!(" The writing task was: {}", prompt));
    }

    vec![ChatMessage::system(system), ChatMessage::user(param.text.clone())]
}

pub struct WritingService<'a> {
    db: &'a DatabaseConnection,
    completion: &'a dyn CompletionProvider,
}

impl<'a> WritingService<'a> {
    pub fn new(db: &'a DatabaseConnection, completion: &'a dyn CompletionProvider) -> Self {
        Self { db, completion }
    }

    /// Reviews a piece of writing and stores the correction.
    ///
    /// Costs [`WRITING_REVIEW_COST`] points, refunded when the model call fails, its
    /// answer cannot be parsed, or the submission cannot be stored.
    ///
    /// # Returns
    /// - `Ok(WritingReviewResult)` - Stored submission and remaining balance
    /// - `Err(AppError::PointsErr)` - Not enough points
    /// - `Err(AppError::IntegrationErr | ReqwestErr)` - Review failed (refunded)
    pub async fn submit(
        &self,
        user: &User,
        param: SubmitWritingParam,
    ) -> Result<WritingReviewResult, AppError> {
        let points = PointsService::new(self.db);
        let points_remaining = points
            .debit(user.id, WRITING_REVIEW_COST, PointReason::WritingReview)
            .await?;

        let outcome = async {
            let review = self.review(user, &param).await?;
            Ok::<_, AppError>(
                WritingRepository::new(self.db)
                    .create(user.id, param, review)
                    .await?,
            )
        }
        .await;
        let submission = points
            .refund_on_error(user.id, WRITING_REVIEW_COST, outcome)
            .await?;

        Ok(WritingReviewResult {
            submission,
            points_remaining,
        })
    }

    async fn review(
        &self,
        user: &User,
        param: &SubmitWritingParam,
    ) -> Result<WritingReview, AppError> {
        let raw = self.completion.complete(&review_request(user, param)).await?;
        Ok(WritingReview::parse(&raw)?)
    }

    pub async fn list(
        &self,
        user_id: i32,
        param: PageParam,
    ) -> Result<Paginated<WritingSubmission>, AppError> {
        let (submissions, total) = WritingRepository::new(self.db)
            .get_by_user_paginated(user_id, param)
            .await?;

        Ok(Paginated::new(submissions, total, param))
    }

    pub async fn get(&self, user_id: i32, submission_id: i32) -> Result<WritingSubmission, AppError> {
        WritingRepository::new(self.db)
            .find(user_id, submission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Writing submission not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{
        data::user::UserRepository, error::points::PointsError,
        integration::completion::mock::ScriptedCompletion,
    };
    use test_utils::{builder::TestBuilder, factory};

    fn essay() -> SubmitWritingParam {
        SubmitWritingParam {
            prompt: Some("Describe your weekend".to_string()),
            text: "Yesterday I go to the park with my friend.".to_string(),
        }
    }

    async fn user_with_points(db: &DatabaseConnection, points: i32) -> User {
        let user = factory::user::UserFactory::new(db)
            .points(points)
            .build()
            .await
            .unwrap();
        UserRepository::new(db)
            .find_by_id(user.id)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_submit_stores_review() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = user_with_points(db, 20).await;
        let completion = ScriptedCompletion::replying(
            r#"{"corrected_text": "Yesterday I went to the park with my friend.", "feedback": "Use the past tense.", "score": 70}"#,
        );
        let service = WritingService::new(db, completion.as_ref());

        let result = service.submit(&user, essay()).await.unwrap();

        assert_eq!(result.points_remaining, 20 - WRITING_REVIEW_COST);
        assert_eq!(result.submission.score, 70);
        assert_eq!(
            result.submission.original_text,
            "Yesterday I go to the park with my friend."
        );
        assert!(completion.calls()[0][0].content.contains("Describe your weekend"));

        let fetched = service.get(user.id, result.submission.id).await.unwrap();
        assert_eq!(fetched.corrected_text, result.submission.corrected_text);
    }

    #[tokio::test]
    async fn test_unparseable_review_is_refunded() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = user_with_points(db, 20).await;
        let completion = ScriptedCompletion::replying("Looks great to me!");
        let service = WritingService::new(db, completion.as_ref());

        let result = service.submit(&user, essay()).await;

        assert!(matches!(result, Err(AppError::IntegrationErr(_))));
        let user = UserRepository::new(db).find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(user.points, 20);
        let history = service
            .list(user.id, PageParam { page: 0, per_page: 10 })
            .await
            .unwrap();
        assert_eq!(history.total, 0);
    }

    #[tokio::test]
    async fn test_submit_without_points_skips_model() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = user_with_points(db, WRITING_REVIEW_COST - 1).await;
        let completion = ScriptedCompletion::replying("unused");
        let service = WritingService::new(db, completion.as_ref());

        let result = service.submit(&user, essay()).await;

        assert!(matches!(
            result,
            Err(AppError::PointsErr(PointsError::Insufficient { .. }))
        ));
        assert!(completion.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_hides_other_users_submissions() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let owner = user_with_points(db, 20).await;
        let other = user_with_points(db, 20).await;
        let completion = ScriptedCompletion::replying(
            r#"{"corrected_text": "Fine.", "feedback": "", "score": 90}"#,
        );
        let service = WritingService::new(db, completion.as_ref());
        let result = service.submit(&owner, essay()).await.unwrap();

        let fetched = service.get(other.id, result.submission.id).await;

        assert!(matches!(fetched, Err(AppError::NotFound(_))));
    }
}
