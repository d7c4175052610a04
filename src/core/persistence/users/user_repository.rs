use crate::core::persistence::db::connection::DbPool;

use super::user_api_repository_trait::UserApiRepository;
use super::user_db_adapter_trait::UserDbAdapterTrait;
use super::user_pg_adapter::UserPgAdapter;

pub struct UserRepository {
    adapter: UserPgAdapter,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            adapter: UserPgAdapter::new(pool),
        }
    }
}

impl UserApiRepository for UserRepository {
    fn db_adapter(&self) -> &dyn UserDbAdapterTrait {
        &self.adapter
    }
}
