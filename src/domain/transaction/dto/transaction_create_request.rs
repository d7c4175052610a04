use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::persistence::transactions::transaction_kind::TransactionKind;

/// Largest single amount accepted: ₹10 trillion in paise.
pub const MAX_AMOUNT_MINOR: i64 = 1_000_000_000_000_000;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransactionCreateRequest {
    pub kind: TransactionKind,
    /// Paise.
    #[validate(range(min = 1, max = MAX_AMOUNT_MINOR))]
    pub amount_minor: i64,
    #[validate(length(min = 1, max = 64))]
    pub category: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    /// Defaults to now.
    pub occurred_at: Option<DateTime<Utc>>,
}
