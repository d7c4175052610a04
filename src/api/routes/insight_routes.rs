use axum::{routing::post, Router};

use crate::api::controller::insight::InsightController;
use crate::app_state::AppState;

pub fn insight_routes() -> Router<AppState> {
    Router::new().route("/", post(InsightController::generate))
}
