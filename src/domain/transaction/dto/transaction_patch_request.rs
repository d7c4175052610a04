use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::persistence::transactions::transaction_kind::TransactionKind;

use super::transaction_create_request::MAX_AMOUNT_MINOR;

/// Partial update; absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TransactionPatchRequest {
    pub kind: Option<TransactionKind>,
    #[validate(range(min = 1, max = MAX_AMOUNT_MINOR))]
    pub amount_minor: Option<i64>,
    #[validate(length(min = 1, max = 64))]
    pub category: Option<String>,
    /// Empty string clears the description.
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
}
