use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::QuizProgress};

/// Resumable quiz-taking state, one record per (quiz, email).
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn save(&self, progress: QuizProgress) -> AppResult<QuizProgress>;
    async fn load(&self, quiz_id: &str, email: &str) -> AppResult<Option<QuizProgress>>;
    async fn clear(&self, quiz_id: &str, email: &str) -> AppResult<()>;
}

pub struct MongoProgressRepository {
    collection: Collection<QuizProgress>,
}

impl MongoProgressRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_progress");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_progress collection");

        let key_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(key_index).await?;

        log::info!("Successfully created indexes for quiz_progress collection");
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for MongoProgressRepository {
    async fn save(&self, progress: QuizProgress) -> AppResult<QuizProgress> {
        self.collection
            .replace_one(
                doc! { "quiz_id": &progress.quiz_id, "email": &progress.email },
                &progress,
            )
            .upsert(true)
            .await?;
        Ok(progress)
    }

    async fn load(&self, quiz_id: &str, email: &str) -> AppResult<Option<QuizProgress>> {
        let progress = self
            .collection
            .find_one(doc! { "quiz_id": quiz_id, "email": email })
            .await?;
        Ok(progress)
    }

    async fn clear(&self, quiz_id: &str, email: &str) -> AppResult<()> {
        self.collection
            .delete_one(doc! { "quiz_id": quiz_id, "email": email })
            .await?;
        Ok(())
    }
}
