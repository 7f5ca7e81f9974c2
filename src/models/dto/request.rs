use std::collections::BTreeMap;

use async_graphql::InputObject;
use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::models::domain::{submission::normalize_email, StudentIdentity};

/// Email format check on the normalized address; surrounding whitespace and
/// letter case are accepted.
fn validate_padded_email(email: &str) -> Result<(), ValidationError> {
    if normalize_email(email).validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("Invalid email format".into()))
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct CreateClassRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 50))]
    pub section: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct PreviewQuizRequest {
    #[validate(length(max = 100000))]
    pub raw_text: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1))]
    pub class_id: String,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    // Must be the exact text that was previewed.
    #[validate(length(min = 1, max = 100000))]
    pub raw_text: String,

    #[validate(range(min = 1, max = 100))]
    pub max_attempts: u32,

    #[validate(range(max = 600))]
    pub time_limit_minutes: u32,

    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SetCorrectAnswerRequest {
    pub quiz_id: String,

    #[validate(range(min = 1))]
    pub question_number: u32,

    /// `None` clears the answer key for the question.
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct UpdateQuizSettingsRequest {
    pub quiz_id: String,

    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(range(min = 1, max = 100))]
    pub max_attempts: Option<u32>,

    #[validate(range(max = 600))]
    pub time_limit_minutes: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct StudentIdentityInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(custom(function = "validate_padded_email"))]
    pub email: String,

    #[validate(length(max = 50))]
    pub section: Option<String>,

    #[validate(length(max = 100))]
    pub course: Option<String>,
}

impl From<StudentIdentityInput> for StudentIdentity {
    fn from(input: StudentIdentityInput) -> Self {
        StudentIdentity {
            name: input.name,
            email: input.email,
            section: input.section.unwrap_or_default(),
            course: input.course.unwrap_or_default(),
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct AnswerInput {
    pub question_number: u32,
    pub chosen: String,
}

/// Collects answers into a number-keyed map. Blank choices count as
/// unanswered and a repeated number keeps its last choice.
pub fn answers_map(answers: &[AnswerInput]) -> BTreeMap<u32, String> {
    answers
        .iter()
        .filter(|a| !a.chosen.trim().is_empty())
        .map(|a| (a.question_number, a.chosen.trim().to_ascii_lowercase()))
        .collect()
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct StartQuizRequest {
    #[validate(nested)]
    pub student: StudentIdentityInput,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SubmitQuizRequest {
    #[validate(nested)]
    pub student: StudentIdentityInput,

    #[serde(default)]
    pub answers: Vec<AnswerInput>,

    /// Set by the client when its countdown reached zero.
    #[serde(default)]
    pub timer_expired: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SaveProgressRequest {
    #[validate(custom(function = "validate_padded_email"))]
    pub email: String,

    #[serde(default)]
    pub answers: Vec<AnswerInput>,

    #[serde(default)]
    pub current_index: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct ProgressQuery {
    #[validate(custom(function = "validate_padded_email"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}
