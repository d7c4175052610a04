use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::routes::insight_routes::insight_routes;
use crate::api::routes::system_routes::system_routes;
use crate::api::routes::transaction_routes::transaction_routes;
use crate::api::routes::user_routes::user_routes;
use crate::app_state::AppState;

/// Build the main application router
pub fn app_router() -> Router<AppState> {
    let api = Router::new()
        .nest("/users", user_routes())
        .nest("/transactions", transaction_routes())
        .nest("/insights", insight_routes())
        .nest("/system", system_routes());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api", api)
        .fallback(handler_404)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to DhanSaathi API" }))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "The requested resource was not found")
}
