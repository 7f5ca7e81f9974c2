pub mod graphql_handler;
pub mod health_handler;
pub mod quiz_handler;

pub use graphql_handler::{graphiql, graphql};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::{
    clear_progress, get_quiz_for_taking, load_progress, preview_quiz, save_progress, start_quiz,
    submit_quiz,
};
