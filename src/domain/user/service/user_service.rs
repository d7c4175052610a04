use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use crate::core::persistence::users::user_api_repository_trait::UserApiRepository;
use crate::core::persistence::users::user_entity::{NewUserEntity, UserEntity};
use crate::core::security::password::{hash_password, verify_password};
use crate::core::util::blocking::run_blocking;
use crate::domain::user::dto::register_user_request::RegisterUserRequest;
use crate::domain::user::dto::user_response::UserResponse;
use crate::errors::AppError;

pub struct UserService {
    repo: Arc<dyn UserApiRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserApiRepository>, bcrypt_cost: u32) -> Self {
        Self { repo, bcrypt_cost }
    }

    pub async fn register(&self, mut req: RegisterUserRequest) -> Result<Value> {
        req.email = normalize_email(&req.email);
        req.validate()?;

        let email = req.email;
        let username = req.username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::BadRequest("Username must not be blank".into()).into());
        }

        let repo = self.repo.clone();
        let lookup = email.clone();
        if run_blocking(move || repo.find_by_email(&lookup)).await?.is_some() {
            return Err(AppError::BadRequest("Email already registered".into()).into());
        }

        let cost = self.bcrypt_cost;
        let password = req.password;
        let hashed_password = run_blocking(move || hash_password(&password, cost)).await?;

        let repo = self.repo.clone();
        let new_user = NewUserEntity {
            username,
            email,
            hashed_password,
        };
        let user = run_blocking(move || repo.insert(&new_user)).await?;
        info!(user_id = user.id, "User registered");

        Ok(json!({
            "message": "User registered successfully",
            "user": { "id": user.id, "email": user.email },
        }))
    }

    /// Same error for unknown email and wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<UserEntity> {
        let invalid = || AppError::BadRequest("Invalid email or password".into());

        let repo = self.repo.clone();
        let email = normalize_email(email);
        let user = run_blocking(move || repo.find_by_email(&email))
            .await?
            .ok_or_else(invalid)?;

        let password = password.to_string();
        let hashed = user.hashed_password.clone();
        if !run_blocking(move || Ok(verify_password(&password, &hashed))).await? {
            return Err(invalid().into());
        }

        Ok(user)
    }

    pub async fn find_user(&self, id: i32) -> Result<Option<UserEntity>> {
        let repo = self.repo.clone();
        run_blocking(move || repo.find_by_id(id)).await
    }

    pub async fn get_user(&self, id: i32) -> Result<UserResponse> {
        self.find_user(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("User not found".into()).into())
    }

    pub async fn list_users(&self) -> Result<Vec<UserResponse>> {
        let repo = self.repo.clone();
        let users = run_blocking(move || repo.list()).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
