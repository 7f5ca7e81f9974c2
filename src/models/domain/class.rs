use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Class {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub owner_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Class {
    pub fn new(name: &str, section: Option<&str>, owner_email: &str) -> Self {
        Class {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            section: section
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            owner_email: owner_email.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
