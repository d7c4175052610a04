use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::core::security::jwt::{AccessClaims, TokenIssuer};
use crate::domain::session::service::session_service::SessionService;
use crate::domain::user::dto::login_request::LoginRequest;
use crate::domain::user::dto::user_response::{TokenResponse, UserResponse};
use crate::errors::AppError;

use super::user_service::UserService;

pub const INVALID_TOKEN: &str = "Invalid or expired token";

/// Login, bearer verification and logout.
pub struct AuthService {
    users: Arc<UserService>,
    issuer: TokenIssuer,
    sessions: SessionService,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, issuer: TokenIssuer, sessions: SessionService) -> Self {
        Self {
            users,
            issuer,
            sessions,
        }
    }

    pub async fn login(&self, form: LoginRequest) -> Result<TokenResponse> {
        let user = self.users.authenticate(&form.username, &form.password).await?;
        let (access_token, _) = self.issuer.create_access_token(user.id, None)?;
        info!(user_id = user.id, "User logged in");

        Ok(TokenResponse {
            access_token,
            token_type: "bearer",
            user: UserResponse::from(user),
        })
    }

    /// Claims for a token that verifies and has not been revoked.
    pub async fn verify_bearer(&self, token: &str) -> Result<AccessClaims> {
        let claims = self
            .issuer
            .verify_access_token(token)
            .ok_or_else(|| AppError::Unauthorized(INVALID_TOKEN.into()))?;

        if self.sessions.is_revoked(&claims.jti).await? {
            debug!(user_id = claims.user_id, "Rejected revoked token");
            return Err(AppError::Unauthorized(INVALID_TOKEN.into()).into());
        }

        Ok(claims)
    }

    pub async fn logout(&self, claims: &AccessClaims) -> Result<Value> {
        self.sessions.revoke(claims).await?;
        Ok(json!({ "message": "Logged out" }))
    }
}
