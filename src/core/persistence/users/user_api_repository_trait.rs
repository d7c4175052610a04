use anyhow::Result;

use super::user_db_adapter_trait::UserDbAdapterTrait;
use super::user_entity::{NewUserEntity, UserEntity};

/// API-facing repository abstraction for users.
pub trait UserApiRepository: Send + Sync {
    fn db_adapter(&self) -> &dyn UserDbAdapterTrait;

    fn find_by_id(&self, id: i32) -> Result<Option<UserEntity>> {
        self.db_adapter().find_by_id(id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>> {
        self.db_adapter().find_by_email(email)
    }

    fn list(&self) -> Result<Vec<UserEntity>> {
        self.db_adapter().list()
    }

    fn insert(&self, data: &NewUserEntity) -> Result<UserEntity> {
        self.db_adapter().insert(data)
    }
}
