use crate::core::persistence::db::connection::DbPool;

use super::transaction_api_repository_trait::TransactionApiRepository;
use super::transaction_db_adapter_trait::TransactionDbAdapterTrait;
use super::transaction_pg_adapter::TransactionPgAdapter;

pub struct TransactionRepository {
    adapter: TransactionPgAdapter,
}

impl TransactionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            adapter: TransactionPgAdapter::new(pool),
        }
    }
}

impl TransactionApiRepository for TransactionRepository {
    fn db_adapter(&self) -> &dyn TransactionDbAdapterTrait {
        &self.adapter
    }
}
