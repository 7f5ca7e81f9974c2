#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quizdesk_server::{
    app_state::AppState,
    auth::Claims,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Class, Quiz, QuizProgress, Submission},
    repositories::{ClassRepository, ProgressRepository, QuizRepository, SubmissionRepository},
    services::quiz_parser::parse_quiz_text,
};

pub const TEACHER_EMAIL: &str = "teacher@school.edu";

pub const SAMPLE_QUIZ_TEXT: &str = "\
1. What is 2 + 2?
a. 3
b. 4 - correct
c. 5
=====
2) Which planet is closest to the sun?
a) Venus
b) Mercury - correct
=====
3. Capital of France?
a. Paris -correct
b. Lyon";

pub struct InMemoryClassRepository {
    classes: Arc<RwLock<HashMap<String, Class>>>,
}

impl InMemoryClassRepository {
    pub fn new() -> Self {
        Self {
            classes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ClassRepository for InMemoryClassRepository {
    async fn create(&self, class: Class) -> AppResult<Class> {
        let mut classes = self.classes.write().await;
        if classes.contains_key(&class.id) {
            return Err(AppError::AlreadyExists(format!(
                "Class with id '{}' already exists",
                class.id
            )));
        }
        classes.insert(class.id.clone(), class.clone());
        Ok(class)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Class>> {
        let classes = self.classes.read().await;
        Ok(classes.get(id).cloned())
    }

    async fn list_by_owner(&self, owner_email: &str) -> AppResult<Vec<Class>> {
        let classes = self.classes.read().await;
        let mut items: Vec<_> = classes
            .values()
            .filter(|c| c.owner_email == owner_email)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }
}

pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).cloned())
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.id
            )));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if !quizzes.contains_key(&quiz.id) {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                quiz.id
            )));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn list_by_class(&self, class_id: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .values()
            .filter(|q| q.class_id == class_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(items)
    }
}

pub struct InMemorySubmissionRepository {
    submissions: Arc<RwLock<Vec<Submission>>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self {
            submissions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.submissions.read().await.len()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn count_attempts(&self, quiz_id: &str, email: &str) -> AppResult<u32> {
        let submissions = self.submissions.read().await;
        let count = submissions
            .iter()
            .filter(|s| s.quiz_id == quiz_id && s.student.email == email)
            .count();
        Ok(count as u32)
    }

    async fn create_within_limit(
        &self,
        mut submission: Submission,
        max_attempts: u32,
    ) -> AppResult<Submission> {
        // Count and insert under one write lock.
        let mut submissions = self.submissions.write().await;
        let count = submissions
            .iter()
            .filter(|s| {
                s.quiz_id == submission.quiz_id && s.student.email == submission.student.email
            })
            .count() as u32;
        if count >= max_attempts {
            return Err(AppError::AttemptLimitReached {
                limit: max_attempts,
                count,
            });
        }

        submission.attempt_number = count + 1;
        submissions.push(submission.clone());
        Ok(submission)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions.iter().find(|s| s.id == id).cloned())
    }

    async fn list_by_quiz(
        &self,
        quiz_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let submissions = self.submissions.read().await;
        let mut items: Vec<_> = submissions
            .iter()
            .filter(|s| s.quiz_id == quiz_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        let total = items.len() as i64;
        let start = offset.max(0) as usize;
        let end = (start + limit.max(0) as usize).min(items.len());

        let page = if start >= items.len() {
            vec![]
        } else {
            items[start..end].to_vec()
        };

        Ok((page, total))
    }
}

pub struct InMemoryProgressRepository {
    progress: Arc<RwLock<HashMap<(String, String), QuizProgress>>>,
}

impl InMemoryProgressRepository {
    pub fn new() -> Self {
        Self {
            progress: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn save(&self, progress: QuizProgress) -> AppResult<QuizProgress> {
        let mut store = self.progress.write().await;
        store.insert(
            (progress.quiz_id.clone(), progress.email.clone()),
            progress.clone(),
        );
        Ok(progress)
    }

    async fn load(&self, quiz_id: &str, email: &str) -> AppResult<Option<QuizProgress>> {
        let store = self.progress.read().await;
        Ok(store.get(&(quiz_id.to_string(), email.to_string())).cloned())
    }

    async fn clear(&self, quiz_id: &str, email: &str) -> AppResult<()> {
        let mut store = self.progress.write().await;
        store.remove(&(quiz_id.to_string(), email.to_string()));
        Ok(())
    }
}

/// Application state over in-memory stores, with handles kept for
/// assertions and seeding.
pub struct TestContext {
    pub state: AppState,
    pub classes: Arc<InMemoryClassRepository>,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub submissions: Arc<InMemorySubmissionRepository>,
    pub progress: Arc<InMemoryProgressRepository>,
}

impl TestContext {
    pub fn new() -> Self {
        let classes = Arc::new(InMemoryClassRepository::new());
        let quizzes = Arc::new(InMemoryQuizRepository::new());
        let submissions = Arc::new(InMemorySubmissionRepository::new());
        let progress = Arc::new(InMemoryProgressRepository::new());

        let state = AppState::with_repositories(
            Config::test_config(),
            classes.clone(),
            quizzes.clone(),
            submissions.clone(),
            progress.clone(),
        );

        Self {
            state,
            classes,
            quizzes,
            submissions,
            progress,
        }
    }

    /// Stores a quiz parsed from `raw` directly, bypassing the class check.
    pub async fn seed_quiz(&self, raw: &str, max_attempts: u32, time_limit_minutes: u32) -> Quiz {
        let quiz = Quiz::new(
            "class-1",
            "Seeded quiz",
            TEACHER_EMAIL,
            parse_quiz_text(raw),
            max_attempts,
            time_limit_minutes,
        );
        self.quizzes.create(quiz).await.expect("seed quiz")
    }
}

pub fn teacher_claims() -> Claims {
    Claims::new("teacher-1", TEACHER_EMAIL, "Test Teacher", 1)
}

pub fn other_teacher_claims() -> Claims {
    Claims::new("teacher-2", "someone.else@school.edu", "Other Teacher", 1)
}
