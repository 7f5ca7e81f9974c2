use crate::{
    auth::Claims,
    models::domain::{Quiz, StudentIdentity},
    services::quiz_parser::parse_quiz_text,
};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Three well-formed questions, the second without a marked answer.
    pub const SAMPLE_QUIZ_TEXT: &str = "\
1. What is 2 + 2?
a. 3
b. 4 - correct
c. 5
=====
2) Which planet is closest to the sun?
a) Venus
b) Mercury
=====
3. Capital of France?
a. Paris -correct
b. Lyon
c. Nice
d. Lille";

    pub fn test_quiz() -> Quiz {
        test_quiz_with(1, 0)
    }

    pub fn test_quiz_with(max_attempts: u32, time_limit_minutes: u32) -> Quiz {
        Quiz::new(
            "class-1",
            "Week 1 check-in",
            "teacher@school.edu",
            parse_quiz_text(SAMPLE_QUIZ_TEXT),
            max_attempts,
            time_limit_minutes,
        )
    }

    pub fn test_student() -> StudentIdentity {
        StudentIdentity {
            name: "Ada Lovelace".to_string(),
            email: "ada@student.school.edu".to_string(),
            section: "A".to_string(),
            course: "CS101".to_string(),
        }
    }

    pub fn test_claims() -> Claims {
        Claims::new("teacher-1", "teacher@school.edu", "Test Teacher", 1)
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::test_helpers::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_fixture_quiz_parses_all_questions() {
        let quiz = test_quiz();
        assert_eq!(quiz.questions.len(), 3);
        assert_eq!(quiz.questions[0].correct_answer.as_deref(), Some("b"));
        assert_eq!(quiz.questions[1].correct_answer, None);
        assert_eq!(quiz.questions[2].correct_answer.as_deref(), Some("a"));
    }

    #[test]
    fn test_fixture_claims_domain() {
        let claims = test_claims();
        assert_eq!(claims.email_domain(), Some("school.edu"));
    }

    #[test]
    fn test_fixture_student_is_already_normalized() {
        let student = test_student();
        assert_eq!(student.normalized(), student);
    }

    #[test]
    fn test_status_helpers() {
        assert_success_status(StatusCode::CREATED);
        assert_error_status(StatusCode::CONFLICT);
    }
}
