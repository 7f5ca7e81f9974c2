pub mod class;
pub mod progress;
pub mod question;
pub mod quiz;
pub mod submission;
pub use class::Class;
pub use progress::QuizProgress;
pub use question::{Question, QuestionOption};
pub use quiz::Quiz;
pub use submission::{AnswerRecord, StudentIdentity, Submission};
