use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::domain::{AnswerRecord, Question, Quiz, StudentIdentity, Submission};
use crate::services::admission::{self, Refusal};

/// Score summary for one graded set of answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeOutcome {
    pub answers: Vec<AnswerRecord>,
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
}

/// Everything about an attempt the grader needs besides the quiz and answers.
#[derive(Debug, Clone)]
pub struct AttemptContext {
    pub student: StudentIdentity,
    pub prior_attempts: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub submitted_at: DateTime<Utc>,
    pub client_timer_expired: bool,
}

pub struct GradingService;

impl GradingService {
    /// Grade `answers` (question number to chosen label) against the
    /// answer-bearing `quiz`. Every question yields exactly one record.
    pub fn grade(quiz: &Quiz, answers: &BTreeMap<u32, String>) -> GradeOutcome {
        let records: Vec<AnswerRecord> = quiz
            .questions
            .iter()
            .map(|question| Self::grade_question(question, answers.get(&question.number)))
            .collect();

        let score = records.iter().filter(|r| r.is_correct).count() as u32;
        let total = quiz.questions.len() as u32;

        GradeOutcome {
            answers: records,
            score,
            total,
            percentage: percentage(score, total),
        }
    }

    fn grade_question(question: &Question, chosen: Option<&String>) -> AnswerRecord {
        let chosen = chosen
            .map(|c| c.trim().to_ascii_lowercase())
            .unwrap_or_default();
        let correct = question.correct_answer.clone().unwrap_or_default();

        let is_correct =
            !chosen.is_empty() && question.correct_answer.as_deref() == Some(chosen.as_str());

        AnswerRecord {
            question_number: question.number,
            question: question.question.clone(),
            chosen_text: question.option_text(&chosen).unwrap_or_default().to_string(),
            correct_text: question.option_text(&correct).unwrap_or_default().to_string(),
            chosen,
            correct,
            is_correct,
        }
    }

    /// Admission check followed by grading. Either a complete submission is
    /// produced or the attempt is refused; nothing in between.
    pub fn grade_submission(
        quiz: &Quiz,
        answers: &BTreeMap<u32, String>,
        ctx: AttemptContext,
    ) -> Result<Submission, Refusal> {
        let admitted = admission::check_admission(Some(quiz), ctx.prior_attempts)?;

        let deadline = ctx
            .started_at
            .and_then(|started| admission::deadline_for(quiz, started));
        let timing =
            admission::classify_timing(deadline, ctx.submitted_at, ctx.client_timer_expired);

        let outcome = Self::grade(quiz, answers);

        Ok(Submission {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz.id.clone(),
            student: ctx.student.normalized(),
            attempt_number: admitted.attempt_number,
            answers: outcome.answers,
            score: outcome.score,
            total: outcome.total,
            percentage: outcome.percentage,
            auto_submitted: timing.is_auto(),
            started_at: ctx.started_at,
            submitted_at: ctx.submitted_at,
        })
    }
}

/// `round(100 * score / total)`, half-up; 0 for an empty quiz.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * f64::from(score) / f64::from(total)).round() as u32
}
