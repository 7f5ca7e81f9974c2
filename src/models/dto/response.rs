use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Question, QuestionOption, Quiz, QuizProgress, Submission};
use crate::services::quiz_parser::ParseReport;

/// A question as shown to students; it has no answer-key field.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuestionForTaking {
    pub number: u32,
    pub question: String,
    pub options: Vec<QuestionOption>,
}

impl From<&Question> for QuestionForTaking {
    fn from(question: &Question) -> Self {
        QuestionForTaking {
            number: question.number,
            question: question.question.clone(),
            options: question.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizForTaking {
    pub id: String,
    pub title: String,
    pub questions: Vec<QuestionForTaking>,
    pub max_attempts: u32,
    pub time_limit_minutes: u32,
}

impl QuizForTaking {
    pub fn from_quiz(quiz: &Quiz) -> Self {
        QuizForTaking {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            questions: quiz.questions.iter().map(QuestionForTaking::from).collect(),
            max_attempts: quiz.max_attempts,
            time_limit_minutes: quiz.time_limit_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ParsePreview {
    pub question_count: u32,
    pub questions: Vec<Question>,
    pub warnings: Vec<String>,
}

impl From<ParseReport> for ParsePreview {
    fn from(report: ParseReport) -> Self {
        ParsePreview {
            question_count: report.questions.len() as u32,
            warnings: report.warnings.iter().map(|w| w.message()).collect(),
            questions: report.questions,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct StartQuizResponse {
    pub quiz: QuizForTaking,
    pub attempt_number: u32,
    pub attempts_remaining: u32,
    pub started_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SubmissionResponse {
    pub submission: Submission,
    pub passed: bool,
    pub pass_threshold_percent: u32,
}

impl SubmissionResponse {
    pub fn new(submission: Submission, pass_threshold_percent: u32) -> Self {
        SubmissionResponse {
            passed: submission.percentage >= pass_threshold_percent,
            pass_threshold_percent,
            submission,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SavedAnswer {
    pub question_number: u32,
    pub chosen: String,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ProgressDto {
    pub quiz_id: String,
    pub answers: Vec<SavedAnswer>,
    pub current_index: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub deadline: Option<DateTime<Utc>>,
    pub saved_at: DateTime<Utc>,
}

impl From<QuizProgress> for ProgressDto {
    fn from(progress: QuizProgress) -> Self {
        ProgressDto {
            answers: progress
                .answers_by_number()
                .into_iter()
                .map(|(question_number, chosen)| SavedAnswer {
                    question_number,
                    chosen,
                })
                .collect(),
            quiz_id: progress.quiz_id,
            current_index: progress.current_index,
            started_at: progress.started_at,
            deadline: progress.deadline,
            saved_at: progress.saved_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PaginationMetadata {
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PaginatedSubmissions {
    pub data: Vec<Submission>,
    pub pagination: PaginationMetadata,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct MessageResponse {
    pub message: String,
}
