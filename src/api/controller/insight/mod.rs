use axum::extract::State;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::api::extractor::current_user::CurrentUser;
use crate::api::extractor::rejection::ApiJson;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::insight::dto::insight_request::InsightRequest;
use crate::domain::insight::dto::insight_response::InsightResponse;
use crate::errors::AppError;

pub struct InsightController;

impl InsightController {
    pub async fn generate(
        State(state): State<AppState>,
        current: CurrentUser,
        ApiJson(payload): ApiJson<InsightRequest>,
    ) -> Result<Json<ApiResponse<InsightResponse>>, AppError> {
        to_json(state.insight_service.generate(current.user.id, payload).await)
    }
}
