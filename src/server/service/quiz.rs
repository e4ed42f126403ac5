//! Multiple-choice vocabulary quizzes with spaced repetition grading.

use std::collections::HashMap;

use chrono::Utc;
use rand::{seq::SliceRandom, Rng};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{quiz_attempt::QuizAttemptRepository, vocabulary::VocabularyRepository},
    error::AppError,
    model::{
        page::{PageParam, Paginated},
        quiz::{
            GradedAnswer, QuizAnswerParam, QuizAttempt, QuizQuestion, QuizResult,
            DEFAULT_QUESTION_COUNT, MAX_QUESTION_COUNT, OPTIONS_PER_QUESTION,
        },
        vocabulary::{review_outcome, Word},
    },
};

/// Builds up to `count` questions from `words`, which must already be in priority order.
///
/// Each question offers the word's meaning plus distinct meanings of other words.
/// Words without enough distinct distractors are skipped.
pub fn build_questions<R: Rng + ?Sized>(
    words: &[Word],
    count: usize,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    let mut questions = Vec::with_capacity(count);

    for word in words {
        if questions.len() == count {
            break;
        }

        let mut distractors: Vec<&str> = Vec::new();
        for other in words {
            let meaning = other.meaning.as_str();
            if other.id != word.id && meaning != word.meaning && !distractors.contains(&meaning) {
                distractors.push(meaning);
            }
        }

        if distractors.len() < OPTIONS_PER_QUESTION - 1 {
            continue;
        }

        distractors.shuffle(rng);
        let mut options: Vec<String> = distractors
            .into_iter()
            .take(OPTIONS_PER_QUESTION - 1)
            .map(str::to_string)
            .collect();
        options.push(word.meaning.clone());
        options.shuffle(rng);

        questions.push(QuizQuestion {
            word_id: word.id,
            term: word.term.clone(),
            options,
        });
    }

    questions
}

pub struct QuizService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> QuizService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Generates a quiz from the user's vocabulary, due words first.
    ///
    /// # Returns
    /// - `Ok(Vec<QuizQuestion>)` - Between 1 and `count` questions
    /// - `Err(AppError::BadRequest)` - Count outside 1..=20 or fewer than four usable words
    pub async fn generate(
        &self,
        user_id: i32,
        count: Option<usize>,
    ) -> Result<Vec<QuizQuestion>, AppError> {
        let count = count.unwrap_or(DEFAULT_QUESTION_COUNT);
        if !(1..=MAX_QUESTION_COUNT).contains(&count) {
            return Err(AppError::BadRequest(format!(
                "count must be between 1 and {}",
                MAX_QUESTION_COUNT
            )));
        }

        let words = VocabularyRepository::new(self.db)
            .get_all_by_review_order(user_id, Utc::now())
            .await?;

        let questions = build_questions(&words, count, &mut rand::rng());
        if questions.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Add at least {} words with different meanings to take a quiz",
                OPTIONS_PER_QUESTION
            )));
        }

        Ok(questions)
    }

    /// Grades answers, updates each word's review schedule and records the attempt.
    ///
    /// An answer is correct when it equals the stored meaning after trimming.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - No answers given
    /// - `Err(AppError::NotFound)` - An answer refers to a word the user does not own
    pub async fn submit(
        &self,
        user_id: i32,
        answers: Vec<QuizAnswerParam>,
    ) -> Result<QuizResult, AppError> {
        if answers.is_empty() {
            return Err(AppError::BadRequest(
                "Submit at least one answer".to_string(),
            ));
        }
        if answers.len() > MAX_QUESTION_COUNT {
            return Err(AppError::BadRequest(format!(
                "At most {} answers can be submitted",
                MAX_QUESTION_COUNT
            )));
        }

        let repo = VocabularyRepository::new(self.db);
        let ids: Vec<i32> = answers.iter().map(|a| a.word_id).collect();
        let mut words: HashMap<i32, Word> = repo
            .find_many(user_id, &ids)
            .await?
            .into_iter()
            .map(|word| (word.id, word))
            .collect();

        if let Some(missing) = ids.iter().find(|id| !words.contains_key(id)) {
            return Err(AppError::NotFound(format!("Word {} not found", missing)));
        }

        let now = Utc::now();
        let mut results = Vec::with_capacity(answers.len());
        for answer in answers {
            let Some(word) = words.get_mut(&answer.word_id) else {
                continue;
            };

            let correct = answer.answer.trim() == word.meaning.trim();
            let outcome = review_outcome(word.mastery, correct, now);
            repo.apply_review(word.id, outcome).await?;

            // A word answered twice builds on its first result.
            word.mastery = outcome.mastery;
            word.next_review_at = outcome.next_review_at;

            results.push(GradedAnswer {
                word_id: word.id,
                term: word.term.clone(),
                correct,
                expected: word.meaning.clone(),
                mastery: outcome.mastery,
            });
        }

        let total = results.len() as i32;
        let correct = results.iter().filter(|r| r.correct).count() as i32;
        let attempt = QuizAttemptRepository::new(self.db)
            .create(user_id, total, correct)
            .await?;

        tracing::debug!(
            "User {} scored {}/{} on quiz attempt {}",
            user_id,
            correct,
            total,
            attempt.id
        );

        Ok(QuizResult {
            attempt_id: attempt.id,
            total,
            correct,
            results,
        })
    }

    pub async fn history(
        &self,
        user_id: i32,
        param: PageParam,
    ) -> Result<Paginated<QuizAttempt>, AppError> {
        let (attempts, total) = QuizAttemptRepository::new(self.db)
            .get_by_user_paginated(user_id, param)
            .await?;

        Ok(Paginated::new(attempts, total, param))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::{rngs::StdRng, SeedableRng};
    use test_utils::{builder::TestBuilder, factory};

    fn word(id: i32, meaning: &str) -> Word {
        Word {
            id,
            user_id: 1,
            term: format!("term-{}", id),
            meaning: meaning.to_string(),
            example: None,
            mastery: 0,
            next_review_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_questions_have_four_distinct_options() {
        let words: Vec<_> = (1..=6).map(|i| word(i, &format!("m{}", i))).collect();
        let questions = build_questions(&words, 3, &mut StdRng::seed_from_u64(7));

        assert_eq!(questions.len(), 3);
        for (question, word) in questions.iter().zip(&words) {
            assert_eq!(question.word_id, word.id);
            assert_eq!(question.options.len(), OPTIONS_PER_QUESTION);
            assert!(question.options.contains(&word.meaning));

            let mut unique = question.options.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), OPTIONS_PER_QUESTION);
        }
    }

    #[test]
    fn test_too_few_distinct_meanings_yields_no_questions() {
        let words = vec![word(1, "a"), word(2, "a"), word(3, "b"), word(4, "c")];
        let questions = build_questions(&words, 10, &mut StdRng::seed_from_u64(1));

        // Every word sees at most two other meanings.
        assert!(questions.is_empty());
    }

    #[tokio::test]
    async fn test_generate_requires_four_words() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (user, _) = factory::helpers::create_user_with_words(db, 3).await.unwrap();

        let result = QuizService::new(db).generate(user.id, None).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_generate_rejects_bad_count() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (user, _) = factory::helpers::create_user_with_words(db, 5).await.unwrap();
        let service = QuizService::new(db);

        assert!(service.generate(user.id, Some(0)).await.is_err());
        assert!(service.generate(user.id, Some(21)).await.is_err());
        assert_eq!(service.generate(user.id, Some(2)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_generate_puts_due_words_first() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await.unwrap();
        let now = Utc::now();
        for days in 1..=4 {
            factory::vocabulary_word::WordFactory::new(db, user.id)
                .next_review_at(now + Duration::days(days))
                .build()
                .await
                .unwrap();
        }
        let due = factory::vocabulary_word::WordFactory::new(db, user.id)
            .next_review_at(now - Duration::days(1))
            .build()
            .await
            .unwrap();

        let questions = QuizService::new(db).generate(user.id, Some(1)).await.unwrap();

        assert_eq!(questions[0].word_id, due.id);
    }

    #[tokio::test]
    async fn test_generate_prefers_weak_words_among_pending() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await.unwrap();
        let now = Utc::now();
        factory::vocabulary_word::WordFactory::new(db, user.id)
            .mastery(5)
            .next_review_at(now + Duration::hours(1))
            .build()
            .await
            .unwrap();
        let weak = factory::vocabulary_word::WordFactory::new(db, user.id)
            .mastery(0)
            .next_review_at(now + Duration::hours(2))
            .build()
            .await
            .unwrap();
        for _ in 0..3 {
            factory::vocabulary_word::WordFactory::new(db, user.id)
                .mastery(3)
                .next_review_at(now + Duration::days(5))
                .build()
                .await
                .unwrap();
        }

        let questions = QuizService::new(db).generate(user.id, Some(1)).await.unwrap();

        assert_eq!(questions[0].word_id, weak.id);
    }

    #[tokio::test]
    async fn test_submit_grades_and_reschedules() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await.unwrap();
        let known = factory::vocabulary_word::WordFactory::new(db, user.id)
            .meaning("happy")
            .mastery(2)
            .build()
            .await
            .unwrap();
        let missed = factory::vocabulary_word::WordFactory::new(db, user.id)
            .meaning("sad")
            .mastery(4)
            .build()
            .await
            .unwrap();
        let service = QuizService::new(db);

        let result = service
            .submit(
                user.id,
                vec![
                    QuizAnswerParam {
                        word_id: known.id,
                        answer: " happy ".to_string(),
                    },
                    QuizAnswerParam {
                        word_id: missed.id,
                        answer: "angry".to_string(),
                    },
                ],
            )
            .await
            .unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.correct, 1);
        assert_eq!(result.results[0].mastery, 3);
        assert_eq!(result.results[1].mastery, 0);
        assert_eq!(result.results[1].expected, "sad");

        let repo = VocabularyRepository::new(db);
        let known = repo.find(user.id, known.id).await.unwrap().unwrap();
        assert!(known.next_review_at > Utc::now() + Duration::days(6));

        let history = service
            .history(user.id, PageParam { page: 0, per_page: 10 })
            .await
            .unwrap();
        assert_eq!(history.items[0].id, result.attempt_id);
    }

    #[tokio::test]
    async fn test_submit_rejects_foreign_word() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let owner = factory::create_user(db).await.unwrap();
        let other = factory::create_user(db).await.unwrap();
        let word = factory::create_word(db, owner.id).await.unwrap();
        let service = QuizService::new(db);

        let result = service
            .submit(
                other.id,
                vec![QuizAnswerParam {
                    word_id: word.id,
                    answer: word.meaning.clone(),
                }],
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        assert!(matches!(
            service.submit(owner.id, vec![]).await,
            Err(AppError::BadRequest(_))
        ));
    }
}
