//! User routes (e.g., /api/users/*)

use axum::{routing::{get, post}, Router};

use crate::api::controller::user::UserController;
use crate::app_state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(UserController::register))
        .route("/login", post(UserController::login))
        .route("/logout", post(UserController::logout))
        .route("/me", get(UserController::me))
        .route("/users", get(UserController::list_users))
        .route("/users/{user_id}", get(UserController::get_user))
}
