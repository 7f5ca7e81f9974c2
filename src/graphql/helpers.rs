use async_graphql::ErrorExtensions;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Helper to check a GraphQL ID is a UUID before it reaches the store
pub fn parse_id(id: &str) -> AppResult<String> {
    Uuid::parse_str(id.trim())
        .map(|uuid| uuid.to_string())
        .map_err(|_| AppError::ValidationError("Invalid UUID format".to_string()))
}

/// Converts service results into GraphQL results, keeping the error `code`
/// extension.
pub trait IntoGqlResult<T> {
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T> IntoGqlResult<T> for AppResult<T> {
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.extend())
    }
}
