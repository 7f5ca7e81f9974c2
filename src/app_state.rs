use std::sync::Arc;

use crate::{
    auth::{authenticate_bearer, Claims, JwtService},
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        ClassRepository, MongoClassRepository, MongoProgressRepository, MongoQuizRepository,
        MongoSubmissionRepository, ProgressRepository, QuizRepository, SubmissionRepository,
    },
    services::{
        class_service::ClassService, quiz_service::QuizService,
        submission_service::SubmissionService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub class_service: Arc<ClassService>,
    pub quiz_service: Arc<QuizService>,
    pub submission_service: Arc<SubmissionService>,
    pub jwt_service: Arc<JwtService>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let class_repository = Arc::new(MongoClassRepository::new(&db));
        class_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let submission_repository = Arc::new(MongoSubmissionRepository::new(&db));
        submission_repository.ensure_indexes().await?;

        let progress_repository = Arc::new(MongoProgressRepository::new(&db));
        progress_repository.ensure_indexes().await?;

        let mut state = Self::with_repositories(
            config,
            class_repository,
            quiz_repository,
            submission_repository,
            progress_repository,
        );
        state.db = Some(db);
        Ok(state)
    }

    /// Wires services over any store implementation.
    pub fn with_repositories(
        config: Config,
        classes: Arc<dyn ClassRepository>,
        quizzes: Arc<dyn QuizRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        let class_service = Arc::new(ClassService::new(classes.clone()));
        let quiz_service = Arc::new(QuizService::new(quizzes.clone(), classes));
        let submission_service = Arc::new(SubmissionService::new(quizzes, submissions, progress));
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        Self {
            class_service,
            quiz_service,
            submission_service,
            jwt_service,
            db: None,
            config: Arc::new(config),
        }
    }

    /// Educator authentication: bearer token plus the domain allow-list.
    pub fn authenticate(&self, authorization_header: &str) -> AppResult<Claims> {
        authenticate_bearer(
            &self.jwt_service,
            &self.config.allowed_email_domains,
            authorization_header,
        )
    }
}
