use std::sync::Arc;
use validator::Validate;

use crate::{
    auth::{require_owner, Claims},
    errors::{AppError, AppResult},
    models::{
        domain::{question::normalize_label, Quiz},
        dto::{
            request::{CreateQuizRequest, SetCorrectAnswerRequest, UpdateQuizSettingsRequest},
            response::QuizForTaking,
        },
    },
    repositories::{ClassRepository, QuizRepository},
    services::quiz_parser::{self, ParseReport},
};

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    classes: Arc<dyn ClassRepository>,
}

impl QuizService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, classes: Arc<dyn ClassRepository>) -> Self {
        Self { quizzes, classes }
    }

    /// Live preview of pasted text; identical input gives the same questions
    /// that `create_quiz` will store.
    pub fn preview(&self, raw_text: &str) -> ParseReport {
        quiz_parser::parse_quiz_report(raw_text)
    }

    pub async fn create_quiz(&self, claims: &Claims, request: CreateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let class = self
            .classes
            .find_by_id(&request.class_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Class with id '{}' not found", request.class_id))
            })?;
        require_owner(claims, &class.owner_email)?;

        let report = quiz_parser::parse_quiz_report(&request.raw_text);
        if report.questions.is_empty() {
            log::warn!("Quiz '{}' rejected: no valid questions", request.title);
            return Err(AppError::NoValidQuestions);
        }
        for warning in &report.warnings {
            log::warn!("Quiz '{}': {}", request.title, warning.message());
        }

        let mut quiz = Quiz::new(
            &class.id,
            &request.title,
            &claims.email,
            report.questions,
            request.max_attempts,
            request.time_limit_minutes,
        );
        quiz.is_active = request.is_active.unwrap_or(true);

        let quiz = self.quizzes.create(quiz).await?;
        log::info!(
            "Quiz {} created in class {} with {} question(s)",
            quiz.id,
            quiz.class_id,
            quiz.questions.len()
        );
        Ok(quiz)
    }

    /// Answer-bearing quiz for its author.
    pub async fn get_owned_quiz(&self, claims: &Claims, id: &str) -> AppResult<Quiz> {
        let quiz = self
            .quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        require_owner(claims, &quiz.created_by)?;
        Ok(quiz)
    }

    pub async fn list_class_quizzes(&self, claims: &Claims, class_id: &str) -> AppResult<Vec<Quiz>> {
        let class = self
            .classes
            .find_by_id(class_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Class with id '{}' not found", class_id)))?;
        require_owner(claims, &class.owner_email)?;

        self.quizzes.list_by_class(class_id).await
    }

    pub async fn set_correct_answer(
        &self,
        claims: &Claims,
        request: SetCorrectAnswerRequest,
    ) -> AppResult<Quiz> {
        request.validate()?;
        let mut quiz = self.get_owned_quiz(claims, &request.quiz_id).await?;

        let label = match request.correct_answer.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(normalize_label(raw).ok_or_else(|| {
                AppError::ValidationError(format!("'{}' is not an option label", raw))
            })?),
        };

        let question = quiz.question_mut(request.question_number).ok_or_else(|| {
            AppError::NotFound(format!("Question {} not found", request.question_number))
        })?;

        if let Some(label) = &label {
            if !question.has_option(label) {
                return Err(AppError::ValidationError(format!(
                    "Question {} has no option '{}'",
                    request.question_number, label
                )));
            }
        }

        *question = question.clone().with_correct_answer(label);
        quiz.touch();

        let quiz = self.quizzes.update(quiz).await?;
        log::info!(
            "Answer key for question {} of quiz {} changed by {}",
            request.question_number,
            quiz.id,
            claims.email
        );
        Ok(quiz)
    }

    pub async fn set_active(&self, claims: &Claims, quiz_id: &str, active: bool) -> AppResult<Quiz> {
        let mut quiz = self.get_owned_quiz(claims, quiz_id).await?;
        quiz.is_active = active;
        quiz.touch();

        let quiz = self.quizzes.update(quiz).await?;
        log::info!("Quiz {} is now {}", quiz.id, if active { "active" } else { "inactive" });
        Ok(quiz)
    }

    pub async fn update_settings(
        &self,
        claims: &Claims,
        request: UpdateQuizSettingsRequest,
    ) -> AppResult<Quiz> {
        request.validate()?;
        let mut quiz = self.get_owned_quiz(claims, &request.quiz_id).await?;

        if let Some(title) = request.title {
            quiz.title = title.trim().to_string();
        }
        if let Some(max_attempts) = request.max_attempts {
            quiz.max_attempts = max_attempts.max(1);
        }
        if let Some(minutes) = request.time_limit_minutes {
            quiz.time_limit_minutes = minutes;
        }
        quiz.touch();

        self.quizzes.update(quiz).await
    }

    /// Authoritative quiz for grading. Missing and inactive quizzes are
    /// reported the same way.
    pub async fn get_available_quiz(&self, id: &str) -> AppResult<Quiz> {
        match self.quizzes.find_by_id(id).await? {
            Some(quiz) if quiz.is_active => Ok(quiz),
            _ => Err(AppError::QuizUnavailable),
        }
    }

    pub async fn quiz_for_taking(&self, id: &str) -> AppResult<QuizForTaking> {
        let quiz = self.get_available_quiz(id).await?;
        Ok(QuizForTaking::from_quiz(&quiz))
    }
}
