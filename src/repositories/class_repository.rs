use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Class};

#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn create(&self, class: Class) -> AppResult<Class>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Class>>;
    async fn list_by_owner(&self, owner_email: &str) -> AppResult<Vec<Class>>;
}

pub struct MongoClassRepository {
    collection: Collection<Class>,
}

impl MongoClassRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("classes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for classes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let owner_index = IndexModel::builder()
            .keys(doc! { "owner_email": 1 })
            .options(IndexOptions::builder().name("owner_email".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(owner_index).await?;

        log::info!("Successfully created indexes for classes collection");
        Ok(())
    }
}

#[async_trait]
impl ClassRepository for MongoClassRepository {
    async fn create(&self, class: Class) -> AppResult<Class> {
        self.collection.insert_one(&class).await?;
        Ok(class)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Class>> {
        let class = self.collection.find_one(doc! { "id": id }).await?;
        Ok(class)
    }

    async fn list_by_owner(&self, owner_email: &str) -> AppResult<Vec<Class>> {
        let classes = self
            .collection
            .find(doc! { "owner_email": owner_email })
            .sort(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(classes)
    }
}
