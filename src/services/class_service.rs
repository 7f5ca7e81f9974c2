use std::sync::Arc;
use validator::Validate;

use crate::{
    auth::Claims,
    errors::AppResult,
    models::{domain::Class, dto::request::CreateClassRequest},
    repositories::ClassRepository,
};

pub struct ClassService {
    repository: Arc<dyn ClassRepository>,
}

impl ClassService {
    pub fn new(repository: Arc<dyn ClassRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_class(&self, claims: &Claims, request: CreateClassRequest) -> AppResult<Class> {
        request.validate()?;

        let class = Class::new(&request.name, request.section.as_deref(), &claims.email);
        let class = self.repository.create(class).await?;

        log::info!("Class '{}' ({}) created by {}", class.name, class.id, claims.email);
        Ok(class)
    }

    pub async fn list_classes(&self, claims: &Claims) -> AppResult<Vec<Class>> {
        self.repository.list_by_owner(&claims.email).await
    }
}
