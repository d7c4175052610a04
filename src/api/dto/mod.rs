//! API envelope and query DTOs

pub mod paginated_response;
pub mod transaction_dto;

use serde::Serialize;

/// Envelope returned by every JSON endpoint except login.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub is_successful: bool,
    pub data: Option<T>,
    pub error_msg: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            is_successful: true,
            data: Some(data),
            error_msg: None,
        }
    }
}
