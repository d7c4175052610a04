//! User controller: registration, login/logout and user lookups

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::api::dto::ApiResponse;
use crate::api::extractor::current_user::CurrentUser;
use crate::api::extractor::rejection::{ApiForm, ApiJson, ApiPath};
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::user::dto::login_request::LoginRequest;
use crate::domain::user::dto::register_user_request::RegisterUserRequest;
use crate::domain::user::dto::user_response::{TokenResponse, UserResponse};
use crate::errors::AppError;

pub struct UserController;

impl UserController {
    pub async fn register(
        State(state): State<AppState>,
        ApiJson(payload): ApiJson<RegisterUserRequest>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.user_service.register(payload).await)
    }

    /// OAuth2 password flow; the token body is returned unwrapped.
    pub async fn login(
        State(state): State<AppState>,
        ApiForm(form): ApiForm<LoginRequest>,
    ) -> Result<Json<TokenResponse>, AppError> {
        let token = state.auth_service.login(form).await?;
        Ok(Json(token))
    }

    pub async fn logout(
        State(state): State<AppState>,
        current: CurrentUser,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.auth_service.logout(&current.claims).await)
    }

    pub async fn list_users(
        State(state): State<AppState>,
        _current: CurrentUser,
    ) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AppError> {
        to_json(state.user_service.list_users().await)
    }

    pub async fn get_user(
        State(state): State<AppState>,
        _current: CurrentUser,
        ApiPath(user_id): ApiPath<i32>,
    ) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
        to_json(state.user_service.get_user(user_id).await)
    }

    pub async fn me(current: CurrentUser) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
        to_json(Ok(UserResponse::from(current.user)))
    }
}
