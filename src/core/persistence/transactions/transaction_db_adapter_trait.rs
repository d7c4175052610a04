use anyhow::Result;
use chrono::{DateTime, Utc};

use super::transaction_entity::{NewTransactionEntity, TransactionEntity};
use super::transaction_filter::TransactionFilter;

/// Storage operations for transactions. Every lookup is scoped to an owner.
pub trait TransactionDbAdapterTrait: Send + Sync {
    fn insert(&self, data: &NewTransactionEntity) -> Result<TransactionEntity>;

    fn find_for_user(&self, user_id: i32, id: i32) -> Result<Option<TransactionEntity>>;

    /// One page, newest first, plus the total matching the filter.
    fn list_for_user(
        &self,
        user_id: i32,
        filter: &TransactionFilter,
    ) -> Result<(Vec<TransactionEntity>, i64)>;

    /// Everything inside `[from, to]`, newest first.
    fn list_in_range(
        &self,
        user_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TransactionEntity>>;

    /// Writes every mutable column; `None` when the row is gone.
    fn update(&self, data: &TransactionEntity) -> Result<Option<TransactionEntity>>;

    fn delete_for_user(&self, user_id: i32, id: i32) -> Result<bool>;
}
