pub mod class_repository;
pub mod progress_repository;
pub mod quiz_repository;
pub mod submission_repository;

pub use class_repository::{ClassRepository, MongoClassRepository};
pub use progress_repository::{MongoProgressRepository, ProgressRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use submission_repository::{MongoSubmissionRepository, SubmissionRepository};
