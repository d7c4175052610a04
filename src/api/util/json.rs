use anyhow::Result;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::errors::AppError;

/// Map a domain Result<T> into Json<ApiResponse<T>>, keeping the error's status.
pub fn to_json<T: serde::Serialize>(result: Result<T>) -> Result<Json<ApiResponse<T>>, AppError> {
    result.map(|value| Json(ApiResponse::ok(value))).map_err(AppError::from)
}
