use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::persistence::transactions::transaction_kind::TransactionKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub total_income_minor: i64,
    pub total_expense_minor: i64,
    pub net_minor: i64,
    pub transaction_count: usize,
    pub by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub kind: TransactionKind,
    pub total_minor: i64,
    pub count: usize,
}
