use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resumable state of a student who has started but not submitted a quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizProgress {
    pub quiz_id: String,
    pub email: String,
    /// Keyed by the question number rendered as a string, since BSON
    /// documents only allow string keys.
    pub answers: BTreeMap<String, String>,
    pub current_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub saved_at: DateTime<Utc>,
}

impl QuizProgress {
    pub fn started(
        quiz_id: &str,
        email: &str,
        started_at: DateTime<Utc>,
        deadline: Option<DateTime<Utc>>,
    ) -> Self {
        QuizProgress {
            quiz_id: quiz_id.to_string(),
            email: email.to_string(),
            answers: BTreeMap::new(),
            current_index: 0,
            started_at: Some(started_at),
            deadline,
            saved_at: started_at,
        }
    }

    pub fn answers_by_number(&self) -> BTreeMap<u32, String> {
        self.answers
            .iter()
            .filter_map(|(k, v)| k.parse::<u32>().ok().map(|n| (n, v.clone())))
            .collect()
    }

    pub fn set_answers(&mut self, answers: &BTreeMap<u32, String>) {
        self.answers = answers
            .iter()
            .map(|(n, label)| (n.to_string(), label.clone()))
            .collect();
    }
}
