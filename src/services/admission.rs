use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::domain::Quiz;

/// Why a student may not take or submit a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Refusal {
    /// Inactive or missing; students are not told which.
    #[error("quiz not available")]
    Unavailable,

    #[error("attempt limit reached ({count} of {limit})")]
    AttemptLimitReached { limit: u32, count: u32 },
}

/// Outcome of a passed admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub attempt_number: u32,
    pub attempts_remaining: u32,
}

/// Checks that `quiz` exists, is active and that `prior_attempts` leaves room
/// for one more attempt.
pub fn check_admission(quiz: Option<&Quiz>, prior_attempts: u32) -> Result<Admission, Refusal> {
    let quiz = match quiz {
        Some(quiz) if quiz.is_active => quiz,
        _ => return Err(Refusal::Unavailable),
    };

    let limit = quiz.max_attempts.max(1);
    if prior_attempts >= limit {
        return Err(Refusal::AttemptLimitReached {
            limit,
            count: prior_attempts,
        });
    }

    Ok(Admission {
        attempt_number: prior_attempts + 1,
        attempts_remaining: limit - prior_attempts - 1,
    })
}

/// Wall-clock deadline for an attempt started at `started_at`, if timed.
pub fn deadline_for(quiz: &Quiz, started_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    quiz.time_limit().map(|limit| started_at + limit)
}

/// When a submission arrived relative to its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionTiming {
    OnTime,
    /// Deadline elapsed; accepted as the automatic final submission.
    AutoSubmitted,
}

impl SubmissionTiming {
    pub fn is_auto(self) -> bool {
        matches!(self, SubmissionTiming::AutoSubmitted)
    }
}

/// Late submissions are never rejected, only flagged. A client whose timer
/// fired reports `client_timer_expired` and is treated the same way.
pub fn classify_timing(
    deadline: Option<DateTime<Utc>>,
    submitted_at: DateTime<Utc>,
    client_timer_expired: bool,
) -> SubmissionTiming {
    let late = deadline.is_some_and(|d| submitted_at > d);
    if late || (client_timer_expired && deadline.is_some()) {
        SubmissionTiming::AutoSubmitted
    } else {
        SubmissionTiming::OnTime
    }
}
