use std::future::{ready, Ready};

use actix_web::{http::header::AUTHORIZATION, web, FromRequest, HttpRequest};

use crate::{app_state::AppState, auth::Claims, errors::AppError};

/// Extractor for an educator request carrying a valid bearer token from an
/// allowed email domain.
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authenticate(req).map(AuthenticatedUser))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Claims, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("Application state not configured".to_string()))?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    state.authenticate(header)
}

/// Claims for the request if it carries a usable token; used where
/// authentication is optional, such as the GraphQL endpoint.
pub fn optional_claims(req: &HttpRequest, state: &AppState) -> Option<Claims> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    match state.authenticate(header) {
        Ok(claims) => Some(claims),
        Err(err) => {
            log::warn!("Ignoring bearer token: {}", err);
            None
        }
    }
}
