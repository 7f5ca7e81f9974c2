use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Submission,
};

const DUPLICATE_KEY: i32 = 11000;

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Stored attempts for the (quiz, normalized email) pair.
    async fn count_attempts(&self, quiz_id: &str, email: &str) -> AppResult<u32>;

    /// Counts, admits and inserts as one step, assigning `attempt_number`.
    /// Fails with `AttemptLimitReached` when `max_attempts` is already used,
    /// including when a concurrent attempt took the last slot.
    async fn create_within_limit(
        &self,
        submission: Submission,
        max_attempts: u32,
    ) -> AppResult<Submission>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>>;

    async fn list_by_quiz(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)>;
}

pub struct MongoSubmissionRepository {
    collection: Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("submissions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for submissions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // One document per attempt ordinal closes the count-then-insert race.
        let attempt_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "student.email": 1, "attempt_number": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_email_attempt_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "submitted_at": -1 })
            .options(IndexOptions::builder().name("quiz_submitted".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(attempt_index).await?;
        self.collection.create_index(quiz_index).await?;

        log::info!("Successfully created indexes for submissions collection");
        Ok(())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn count_attempts(&self, quiz_id: &str, email: &str) -> AppResult<u32> {
        let count = self
            .collection
            .count_documents(doc! {
                "quiz_id": quiz_id,
                "student.email": email
            })
            .await?;
        Ok(count as u32)
    }

    async fn create_within_limit(
        &self,
        mut submission: Submission,
        max_attempts: u32,
    ) -> AppResult<Submission> {
        loop {
            let count = self
                .count_attempts(&submission.quiz_id, &submission.student.email)
                .await?;
            if count >= max_attempts {
                return Err(AppError::AttemptLimitReached {
                    limit: max_attempts,
                    count,
                });
            }

            submission.attempt_number = count + 1;
            match self.collection.insert_one(&submission).await {
                Ok(_) => return Ok(submission),
                Err(err) if is_duplicate_key(&err) => {
                    log::warn!(
                        "Concurrent attempt {} for quiz {}; re-checking limit",
                        submission.attempt_number,
                        submission.quiz_id
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let submission = self.collection.find_one(doc! { "id": id }).await?;
        Ok(submission)
    }

    async fn list_by_quiz(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let filter = doc! { "quiz_id": quiz_id };

        let total = self.collection.count_documents(filter.clone()).await?;

        let submissions = self
            .collection
            .find(filter)
            .skip(offset as u64)
            .limit(limit)
            .sort(doc! { "submitted_at": -1 })
            .await?
            .try_collect()
            .await?;

        Ok((submissions, total as i64))
    }
}
