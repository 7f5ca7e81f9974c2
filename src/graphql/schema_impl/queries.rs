use async_graphql::{Context, Object, ID};

use crate::{
    app_state::AppState,
    auth::extract_claims_from_context,
    graphql::helpers::{parse_id, IntoGqlResult},
    models::{
        domain::{Class, Quiz, Submission},
        dto::{
            request::PaginationParams,
            response::{PaginatedSubmissions, ParsePreview, ProgressDto, QuizForTaking},
        },
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Parses pasted quiz text without saving anything.
    async fn preview_quiz(
        &self,
        ctx: &Context<'_>,
        raw_text: String,
    ) -> async_graphql::Result<ParsePreview> {
        let state = ctx.data::<AppState>()?;
        extract_claims_from_context(ctx).gql()?;

        Ok(state.quiz_service.preview(&raw_text).into())
    }

    async fn my_classes(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Class>> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).gql()?;

        state.class_service.list_classes(&claims).await.gql()
    }

    async fn class_quizzes(
        &self,
        ctx: &Context<'_>,
        class_id: ID,
    ) -> async_graphql::Result<Vec<Quiz>> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).gql()?;

        let class_id = parse_id(&class_id).gql()?;
        state
            .quiz_service
            .list_class_quizzes(&claims, &class_id)
            .await
            .gql()
    }

    /// Full quiz including the answer key; author only.
    async fn quiz(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).gql()?;

        let id = parse_id(&id).gql()?;
        state.quiz_service.get_owned_quiz(&claims, &id).await.gql()
    }

    /// Student view; no authentication and no answer key.
    async fn quiz_for_taking(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<QuizForTaking> {
        let state = ctx.data::<AppState>()?;

        let id = parse_id(&id).gql()?;
        state.quiz_service.quiz_for_taking(&id).await.gql()
    }

    async fn quiz_submissions(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> async_graphql::Result<PaginatedSubmissions> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).gql()?;

        let quiz_id = parse_id(&quiz_id).gql()?;
        let pagination = PaginationParams { offset, limit };
        state
            .submission_service
            .list_for_quiz(&claims, &quiz_id, &pagination)
            .await
            .gql()
    }

    async fn submission(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Submission> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).gql()?;

        let id = parse_id(&id).gql()?;
        state.submission_service.get_submission(&claims, &id).await.gql()
    }

    async fn load_progress(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        email: String,
    ) -> async_graphql::Result<Option<ProgressDto>> {
        let state = ctx.data::<AppState>()?;

        let quiz_id = parse_id(&quiz_id).gql()?;
        let progress = state
            .submission_service
            .load_progress(&quiz_id, &email)
            .await
            .gql()?;
        Ok(progress.map(ProgressDto::from))
    }
}
