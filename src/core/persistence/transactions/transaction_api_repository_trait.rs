use anyhow::Result;
use chrono::{DateTime, Utc};

use super::transaction_db_adapter_trait::TransactionDbAdapterTrait;
use super::transaction_entity::{NewTransactionEntity, TransactionEntity};
use super::transaction_filter::TransactionFilter;

/// API-facing repository abstraction for transactions.
pub trait TransactionApiRepository: Send + Sync {
    fn db_adapter(&self) -> &dyn TransactionDbAdapterTrait;

    fn insert(&self, data: &NewTransactionEntity) -> Result<TransactionEntity> {
        self.db_adapter().insert(data)
    }

    fn find_for_user(&self, user_id: i32, id: i32) -> Result<Option<TransactionEntity>> {
        self.db_adapter().find_for_user(user_id, id)
    }

    fn list_for_user(
        &self,
        user_id: i32,
        filter: &TransactionFilter,
    ) -> Result<(Vec<TransactionEntity>, i64)> {
        self.db_adapter().list_for_user(user_id, filter)
    }

    fn list_in_range(
        &self,
        user_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TransactionEntity>> {
        self.db_adapter().list_in_range(user_id, from, to)
    }

    fn update(&self, data: &TransactionEntity) -> Result<Option<TransactionEntity>> {
        self.db_adapter().update(data)
    }

    fn delete_for_user(&self, user_id: i32, id: i32) -> Result<bool> {
        self.db_adapter().delete_for_user(user_id, id)
    }
}
