//! Query strings accepted by the transaction routes
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::persistence::transactions::transaction_kind::TransactionKind;

#[derive(Debug, Default, Deserialize)]
pub struct TransactionListQuery {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionSummaryQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
