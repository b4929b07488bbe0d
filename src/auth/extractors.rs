use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use super::repo_types::User;
use crate::{error::AppError, state::AppState};

/// Resolves the bearer token to the stored user it was issued for.
pub struct AuthUser(pub User);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let auth = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Auth("Authentication required".into()))?;

        let invalid = || AppError::Auth("Invalid token".into());
        let claims = state.keys.verify(token).ok_or_else(invalid)?;

        match state.store.find_user_by_id(claims.user_id()).await? {
            Some(user) => Ok(AuthUser(user)),
            None => {
                warn!(user_id = %claims.user_id(), "token for unknown user");
                Err(invalid())
            }
        }
    }
}
