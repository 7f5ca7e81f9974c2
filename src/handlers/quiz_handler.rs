use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{
            PreviewQuizRequest, ProgressQuery, SaveProgressRequest, StartQuizRequest,
            SubmitQuizRequest,
        },
        response::{MessageResponse, ParsePreview, ProgressDto, SubmissionResponse},
    },
};

#[post("/api/quizzes/preview")]
async fn preview_quiz(
    state: web::Data<AppState>,
    request: web::Json<PreviewQuizRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let preview: ParsePreview = state.quiz_service.preview(&request.raw_text).into();
    Ok(HttpResponse::Ok().json(preview))
}

#[get("/api/quizzes/{id}/take")]
async fn get_quiz_for_taking(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.quiz_for_taking(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/api/quizzes/{id}/start")]
async fn start_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<StartQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .submission_service
        .start_attempt(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/quizzes/{id}/submissions")]
async fn submit_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let submission = state
        .submission_service
        .submit(&id, request.into_inner())
        .await?;

    let response = SubmissionResponse::new(submission, state.config.pass_threshold_percent);
    Ok(HttpResponse::Created().json(response))
}

#[put("/api/quizzes/{id}/progress")]
async fn save_progress(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SaveProgressRequest>,
) -> Result<HttpResponse, AppError> {
    let progress = state
        .submission_service
        .save_progress(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ProgressDto::from(progress)))
}

#[get("/api/quizzes/{id}/progress")]
async fn load_progress(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<ProgressQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let progress = state
        .submission_service
        .load_progress(&id, &query.email)
        .await?
        .ok_or_else(|| AppError::NotFound("No saved progress".to_string()))?;
    Ok(HttpResponse::Ok().json(ProgressDto::from(progress)))
}

#[delete("/api/quizzes/{id}/progress")]
async fn clear_progress(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<ProgressQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    state
        .submission_service
        .clear_progress(&id, &query.email)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Progress cleared".to_string(),
    }))
}
