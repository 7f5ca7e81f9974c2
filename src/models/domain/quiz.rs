use async_graphql::SimpleObject;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::question::Question;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Quiz {
    pub id: String,
    pub class_id: String,
    pub title: String,
    pub created_by: String, // educator email
    pub questions: Vec<Question>,
    pub is_active: bool,
    pub max_attempts: u32,       // 1 = no retakes
    pub time_limit_minutes: u32, // 0 = unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(
        class_id: &str,
        title: &str,
        created_by: &str,
        questions: Vec<Question>,
        max_attempts: u32,
        time_limit_minutes: u32,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            class_id: class_id.to_string(),
            title: title.trim().to_string(),
            created_by: created_by.to_string(),
            questions,
            is_active: true,
            max_attempts: max_attempts.max(1),
            time_limit_minutes,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn question(&self, number: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.number == number)
    }

    pub fn question_mut(&mut self, number: u32) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.number == number)
    }

    /// `None` when the quiz is untimed.
    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_minutes > 0).then(|| Duration::minutes(i64::from(self.time_limit_minutes)))
    }

    pub fn touch(&mut self) {
        self.modified_at = Some(Utc::now());
    }
}
