use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InsightRequest {
    /// Lookback window in days.
    #[validate(range(min = 1, max = 365))]
    pub window_days: Option<u32>,
    /// Optional free-form question; answers to questions are never cached.
    #[validate(length(min = 1, max = 500))]
    pub question: Option<String>,
}
