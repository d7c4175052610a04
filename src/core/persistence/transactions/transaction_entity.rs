use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

use crate::core::persistence::schema::transactions;
use crate::domain::transaction::dto::transaction_patch_request::TransactionPatchRequest;

use super::transaction_kind::TransactionKind;

/// Row in `transactions`. Amounts are paise.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TransactionEntity {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub amount_minor: i64,
    pub category: String,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = transactions)]
pub struct NewTransactionEntity {
    pub user_id: i32,
    pub kind: String,
    pub amount_minor: i64,
    pub category: String,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl TransactionEntity {
    pub fn transaction_kind(&self) -> Option<TransactionKind> {
        TransactionKind::from_code(&self.kind)
    }

    pub fn apply_patch(&mut self, req: TransactionPatchRequest) {
        if let Some(v) = req.kind {
            self.kind = v.as_code().to_string();
        }

        if let Some(v) = req.amount_minor {
            self.amount_minor = v;
        }

        if let Some(v) = req.category {
            if let Some(category) = normalize_category(&v) {
                self.category = category;
            }
        }

        // An empty description clears it
        if let Some(v) = req.description {
            self.description = normalize_string(v);
        }

        if let Some(v) = req.occurred_at {
            self.occurred_at = v;
        }

        self.updated_at = Utc::now();
    }
}

pub fn normalize_category(v: &str) -> Option<String> {
    let s = v.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_lowercase())
    }
}

pub fn normalize_string(v: String) -> Option<String> {
    let s = v.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
