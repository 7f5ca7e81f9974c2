use std::sync::Arc;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    auth::{require_owner, Claims},
    errors::{AppError, AppResult},
    models::{
        domain::{submission::normalize_email, QuizProgress, StudentIdentity, Submission},
        dto::{
            request::{
                answers_map, PaginationParams, SaveProgressRequest, StartQuizRequest,
                SubmitQuizRequest,
            },
            response::{PaginatedSubmissions, PaginationMetadata, QuizForTaking, StartQuizResponse},
        },
    },
    repositories::{ProgressRepository, QuizRepository, SubmissionRepository},
    services::{
        admission,
        grading_service::{AttemptContext, GradingService},
    },
};

pub struct SubmissionService {
    quizzes: Arc<dyn QuizRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl SubmissionService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            quizzes,
            submissions,
            progress,
        }
    }

    /// Admission check for a student opening the quiz. Starts the clock for
    /// timed quizzes; reopening keeps the original deadline.
    pub async fn start_attempt(
        &self,
        quiz_id: &str,
        request: StartQuizRequest,
    ) -> AppResult<StartQuizResponse> {
        self.start_attempt_at(quiz_id, request, Utc::now()).await
    }

    pub async fn start_attempt_at(
        &self,
        quiz_id: &str,
        request: StartQuizRequest,
        now: DateTime<Utc>,
    ) -> AppResult<StartQuizResponse> {
        request.validate()?;
        let student: StudentIdentity = request.student.into();

        let quiz = self.quizzes.find_by_id(quiz_id).await?;
        let prior = match &quiz {
            Some(q) => self.submissions.count_attempts(&q.id, &student.email).await?,
            None => 0,
        };
        let admitted = admission::check_admission(quiz.as_ref(), prior).map_err(|refusal| {
            log::warn!("Start refused for {} on quiz {}: {}", student.email, quiz_id, refusal);
            AppError::from(refusal)
        })?;
        let quiz = quiz.ok_or(AppError::QuizUnavailable)?;

        let deadline = admission::deadline_for(&quiz, now);
        let progress = match self.progress.load(&quiz.id, &student.email).await? {
            Some(existing) if existing.started_at.is_some() => existing,
            // Saved before the clock started: keep the answers, start the clock.
            Some(mut saved) => {
                saved.started_at = Some(now);
                saved.deadline = deadline;
                self.progress.save(saved).await?
            }
            None => {
                self.progress
                    .save(QuizProgress::started(&quiz.id, &student.email, now, deadline))
                    .await?
            }
        };

        Ok(StartQuizResponse {
            quiz: QuizForTaking::from_quiz(&quiz),
            attempt_number: admitted.attempt_number,
            attempts_remaining: admitted.attempts_remaining,
            started_at: progress.started_at.unwrap_or(now),
            deadline: progress.deadline,
        })
    }

    pub async fn submit(&self, quiz_id: &str, request: SubmitQuizRequest) -> AppResult<Submission> {
        self.submit_at(quiz_id, request, Utc::now()).await
    }

    /// Grades against the stored quiz, never against anything the client
    /// sent back, then records the attempt.
    pub async fn submit_at(
        &self,
        quiz_id: &str,
        request: SubmitQuizRequest,
        now: DateTime<Utc>,
    ) -> AppResult<Submission> {
        request.validate()?;
        let answers = answers_map(&request.answers);
        let student: StudentIdentity = request.student.into();

        let quiz = match self.quizzes.find_by_id(quiz_id).await? {
            Some(quiz) if quiz.is_active => quiz,
            _ => {
                log::warn!("Submission for unavailable quiz {} refused", quiz_id);
                return Err(AppError::QuizUnavailable);
            }
        };

        let prior_attempts = self.submissions.count_attempts(&quiz.id, &student.email).await?;
        let started_at = self
            .progress
            .load(&quiz.id, &student.email)
            .await?
            .and_then(|p| p.started_at);

        let ctx = AttemptContext {
            student,
            prior_attempts,
            started_at,
            submitted_at: now,
            client_timer_expired: request.timer_expired.unwrap_or(false),
        };

        let submission =
            GradingService::grade_submission(&quiz, &answers, ctx).map_err(|refusal| {
                log::warn!("Submission refused for quiz {}: {}", quiz.id, refusal);
                AppError::from(refusal)
            })?;

        let submission = self
            .submissions
            .create_within_limit(submission, quiz.max_attempts)
            .await?;

        if let Err(err) = self.progress.clear(&quiz.id, &submission.student.email).await {
            log::warn!("Could not clear saved progress for quiz {}: {}", quiz.id, err);
        }

        log::info!(
            "Graded attempt {} for quiz {}: {}/{} ({}%){}",
            submission.attempt_number,
            quiz.id,
            submission.score,
            submission.total,
            submission.percentage,
            if submission.auto_submitted { " [auto-submitted]" } else { "" }
        );
        Ok(submission)
    }

    pub async fn save_progress(
        &self,
        quiz_id: &str,
        request: SaveProgressRequest,
    ) -> AppResult<QuizProgress> {
        request.validate()?;
        let email = normalize_email(&request.email);

        match self.quizzes.find_by_id(quiz_id).await? {
            Some(quiz) if quiz.is_active => {}
            _ => return Err(AppError::QuizUnavailable),
        }

        let now = Utc::now();
        let mut progress = self
            .progress
            .load(quiz_id, &email)
            .await?
            .unwrap_or_else(|| QuizProgress {
                started_at: None,
                ..QuizProgress::started(quiz_id, &email, now, None)
            });

        progress.set_answers(&answers_map(&request.answers));
        progress.current_index = request.current_index;
        progress.saved_at = now;

        self.progress.save(progress).await
    }

    pub async fn load_progress(&self, quiz_id: &str, email: &str) -> AppResult<Option<QuizProgress>> {
        self.progress.load(quiz_id, &normalize_email(email)).await
    }

    pub async fn clear_progress(&self, quiz_id: &str, email: &str) -> AppResult<()> {
        self.progress.clear(quiz_id, &normalize_email(email)).await
    }

    /// Results for a quiz, visible to its author only.
    pub async fn list_for_quiz(
        &self,
        claims: &Claims,
        quiz_id: &str,
        pagination: &PaginationParams,
    ) -> AppResult<PaginatedSubmissions> {
        self.require_quiz_owner(claims, quiz_id).await?;

        let offset = pagination.offset();
        let limit = pagination.limit();
        let (data, total) = self.submissions.list_by_quiz(quiz_id, offset, limit).await?;

        Ok(PaginatedSubmissions {
            data,
            pagination: PaginationMetadata {
                offset,
                limit,
                total,
            },
        })
    }

    pub async fn get_submission(&self, claims: &Claims, id: &str) -> AppResult<Submission> {
        let submission = self
            .submissions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Submission with id '{}' not found", id)))?;

        self.require_quiz_owner(claims, &submission.quiz_id).await?;
        Ok(submission)
    }

    async fn require_quiz_owner(&self, claims: &Claims, quiz_id: &str) -> AppResult<()> {
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        require_owner(claims, &quiz.created_by)
    }
}
