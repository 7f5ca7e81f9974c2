use async_graphql::Context;

use crate::{
    auth::{Claims, JwtService},
    errors::{AppError, AppResult},
};

/// Validates an `Authorization` header value and applies the domain
/// allow-list. An empty allow-list admits every domain.
pub fn authenticate_bearer(
    jwt_service: &JwtService,
    allowed_domains: &[String],
    header: &str,
) -> AppResult<Claims> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))?;

    let claims = jwt_service.validate_token(token.trim())?;
    require_allowed_domain(&claims, allowed_domains)?;
    Ok(claims)
}

pub fn require_allowed_domain(claims: &Claims, allowed_domains: &[String]) -> AppResult<()> {
    if allowed_domains.is_empty() {
        return Ok(());
    }

    match claims.email_domain() {
        Some(domain) if allowed_domains.iter().any(|d| d == domain) => Ok(()),
        _ => Err(AppError::Forbidden(
            "Your email domain is not allowed to sign in".to_string(),
        )),
    }
}

pub fn require_owner(claims: &Claims, owner_email: &str) -> AppResult<()> {
    if !claims.email.eq_ignore_ascii_case(owner_email) {
        return Err(AppError::Forbidden(
            "You can only access your own classes and quizzes".to_string(),
        ));
    }
    Ok(())
}

pub fn extract_claims_from_context(ctx: &Context<'_>) -> AppResult<Claims> {
    ctx.data::<Claims>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}
