use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct StudentIdentity {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub course: String,
}

impl StudentIdentity {
    /// Email is the attempt-counting key, so it is compared case- and
    /// whitespace-insensitively.
    pub fn normalized(&self) -> Self {
        StudentIdentity {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            section: self.section.trim().to_string(),
            course: self.course.trim().to_string(),
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct AnswerRecord {
    pub question_number: u32,
    pub question: String,
    pub chosen: String,
    pub chosen_text: String,
    pub correct: String,
    pub correct_text: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Submission {
    pub id: String,
    pub quiz_id: String,
    pub student: StudentIdentity,
    pub attempt_number: u32,
    pub answers: Vec<AnswerRecord>,
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub auto_submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_identity_trims_and_lowercases_email() {
        let raw = StudentIdentity {
            name: "  Ada Lovelace ".to_string(),
            email: "  Ada@School.EDU ".to_string(),
            section: " 3B".to_string(),
            course: "Math ".to_string(),
        };

        let identity = raw.normalized();

        assert_eq!(identity.name, "Ada Lovelace");
        assert_eq!(identity.email, "ada@school.edu");
        assert_eq!(identity.section, "3B");
        assert_eq!(identity.course, "Math");
    }

    #[test]
    fn email_variants_share_one_key() {
        assert_eq!(normalize_email("A@B.com"), normalize_email(" a@b.COM "));
    }
}
