use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightResponse {
    pub insight: String,
    /// `None` when no model was consulted.
    pub model: Option<String>,
    pub window_days: u32,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub cached: bool,
}
