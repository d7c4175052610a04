use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::api::dto::paginated_response::PaginatedResponse;
use crate::api::dto::transaction_dto::{TransactionListQuery, TransactionSummaryQuery};
use crate::api::dto::ApiResponse;
use crate::api::extractor::current_user::CurrentUser;
use crate::api::extractor::rejection::{ApiJson, ApiPath, ApiQuery};
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::persistence::transactions::transaction_entity::TransactionEntity;
use crate::domain::transaction::dto::transaction_create_request::TransactionCreateRequest;
use crate::domain::transaction::dto::transaction_patch_request::TransactionPatchRequest;
use crate::domain::transaction::dto::transaction_summary::TransactionSummary;
use crate::errors::AppError;

pub struct TransactionController;

impl TransactionController {
    pub async fn create(
        State(state): State<AppState>,
        current: CurrentUser,
        ApiJson(payload): ApiJson<TransactionCreateRequest>,
    ) -> Result<Json<ApiResponse<TransactionEntity>>, AppError> {
        to_json(state.transaction_service.create(current.user.id, payload).await)
    }

    pub async fn list(
        State(state): State<AppState>,
        current: CurrentUser,
        ApiQuery(query): ApiQuery<TransactionListQuery>,
    ) -> Result<Json<ApiResponse<PaginatedResponse<TransactionEntity>>>, AppError> {
        to_json(state.transaction_service.list(current.user.id, query).await)
    }

    pub async fn get(
        State(state): State<AppState>,
        current: CurrentUser,
        ApiPath(id): ApiPath<i32>,
    ) -> Result<Json<ApiResponse<TransactionEntity>>, AppError> {
        to_json(state.transaction_service.get(current.user.id, id).await)
    }

    pub async fn patch(
        State(state): State<AppState>,
        current: CurrentUser,
        ApiPath(id): ApiPath<i32>,
        ApiJson(payload): ApiJson<TransactionPatchRequest>,
    ) -> Result<Json<ApiResponse<TransactionEntity>>, AppError> {
        to_json(state.transaction_service.patch(current.user.id, id, payload).await)
    }

    pub async fn delete(
        State(state): State<AppState>,
        current: CurrentUser,
        ApiPath(id): ApiPath<i32>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.transaction_service.delete(current.user.id, id).await)
    }

    pub async fn summary(
        State(state): State<AppState>,
        current: CurrentUser,
        ApiQuery(query): ApiQuery<TransactionSummaryQuery>,
    ) -> Result<Json<ApiResponse<TransactionSummary>>, AppError> {
        to_json(state.transaction_service.summary(current.user.id, query).await)
    }
}
