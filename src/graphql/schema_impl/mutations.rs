use async_graphql::{Context, Object, ID};

use crate::{
    app_state::AppState,
    auth::extract_claims_from_context,
    graphql::helpers::{parse_id, IntoGqlResult},
    models::{
        domain::{Class, Quiz},
        dto::{
            request::{
                CreateClassRequest, CreateQuizRequest, SaveProgressRequest,
                SetCorrectAnswerRequest, StartQuizRequest, SubmitQuizRequest,
                UpdateQuizSettingsRequest,
            },
            response::{MessageResponse, ProgressDto, StartQuizResponse, SubmissionResponse},
        },
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_class(
        &self,
        ctx: &Context<'_>,
        input: CreateClassRequest,
    ) -> async_graphql::Result<Class> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).gql()?;

        state.class_service.create_class(&claims, input).await.gql()
    }

    async fn create_quiz(
        &self,
        ctx: &Context<'_>,
        input: CreateQuizRequest,
    ) -> async_graphql::Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).gql()?;

        state.quiz_service.create_quiz(&claims, input).await.gql()
    }

    async fn set_correct_answer(
        &self,
        ctx: &Context<'_>,
        input: SetCorrectAnswerRequest,
    ) -> async_graphql::Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).gql()?;

        let mut input = input;
        input.quiz_id = parse_id(&input.quiz_id).gql()?;
        state.quiz_service.set_correct_answer(&claims, input).await.gql()
    }

    async fn set_quiz_active(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        active: bool,
    ) -> async_graphql::Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).gql()?;

        let quiz_id = parse_id(&quiz_id).gql()?;
        state
            .quiz_service
            .set_active(&claims, &quiz_id, active)
            .await
            .gql()
    }

    async fn update_quiz_settings(
        &self,
        ctx: &Context<'_>,
        input: UpdateQuizSettingsRequest,
    ) -> async_graphql::Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).gql()?;

        let mut input = input;
        input.quiz_id = parse_id(&input.quiz_id).gql()?;
        state.quiz_service.update_settings(&claims, input).await.gql()
    }

    async fn start_quiz(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        input: StartQuizRequest,
    ) -> async_graphql::Result<StartQuizResponse> {
        let state = ctx.data::<AppState>()?;

        let quiz_id = parse_id(&quiz_id).gql()?;
        state
            .submission_service
            .start_attempt(&quiz_id, input)
            .await
            .gql()
    }

    async fn submit_quiz(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        input: SubmitQuizRequest,
    ) -> async_graphql::Result<SubmissionResponse> {
        let state = ctx.data::<AppState>()?;

        let quiz_id = parse_id(&quiz_id).gql()?;
        let submission = state
            .submission_service
            .submit(&quiz_id, input)
            .await
            .gql()?;

        Ok(SubmissionResponse::new(
            submission,
            state.config.pass_threshold_percent,
        ))
    }

    async fn save_progress(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        input: SaveProgressRequest,
    ) -> async_graphql::Result<ProgressDto> {
        let state = ctx.data::<AppState>()?;

        let quiz_id = parse_id(&quiz_id).gql()?;
        let progress = state
            .submission_service
            .save_progress(&quiz_id, input)
            .await
            .gql()?;
        Ok(progress.into())
    }

    async fn clear_progress(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        email: String,
    ) -> async_graphql::Result<MessageResponse> {
        let state = ctx.data::<AppState>()?;

        let quiz_id = parse_id(&quiz_id).gql()?;
        state
            .submission_service
            .clear_progress(&quiz_id, &email)
            .await
            .gql()?;

        Ok(MessageResponse {
            message: "Progress cleared".to_string(),
        })
    }
}
