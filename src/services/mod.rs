pub mod admission;
pub mod class_service;
pub mod grading_service;
pub mod quiz_parser;
pub mod quiz_service;
pub mod submission_service;
