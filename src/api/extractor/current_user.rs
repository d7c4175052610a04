use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::app_state::AppState;
use crate::core::persistence::users::user_entity::UserEntity;
use crate::core::security::jwt::AccessClaims;
use crate::errors::AppError;

pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// The authenticated caller, resolved from `Authorization: Bearer <token>`.
pub struct CurrentUser {
    pub user: UserEntity,
    pub claims: AccessClaims,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized(NOT_AUTHENTICATED.into()))?;

        let claims = state.auth_service.verify_bearer(token).await?;
        let user = state
            .user_service
            .find_user(claims.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        Ok(CurrentUser { user, claims })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}
