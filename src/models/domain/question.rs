use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// Option letters the authoring format recognises, in display order.
pub const OPTION_LABELS: [&str; 4] = ["a", "b", "c", "d"];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Question {
    pub number: u32,
    pub question: String,
    pub options: Vec<QuestionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuestionOption {
    pub label: String,
    pub text: String,
}

impl QuestionOption {
    pub fn new(label: &str, text: &str) -> Self {
        QuestionOption {
            label: label.to_string(),
            text: text.to_string(),
        }
    }
}

impl Question {
    /// Text of the option carrying `label`, if the question has one.
    pub fn option_text(&self, label: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.label == label)
            .map(|o| o.text.as_str())
    }

    pub fn has_option(&self, label: &str) -> bool {
        self.options.iter().any(|o| o.label == label)
    }

    /// Replaces only the answer key; number, prompt and options are untouched.
    pub fn with_correct_answer(mut self, label: Option<String>) -> Self {
        self.correct_answer = label;
        self
    }
}

/// Lowercases and trims a student- or educator-supplied label, returning
/// `None` for anything outside `a`..=`d`.
pub fn normalize_label(raw: &str) -> Option<String> {
    let label = raw.trim().to_ascii_lowercase();
    if OPTION_LABELS.contains(&label.as_str()) {
        Some(label)
    } else {
        None
    }
}
