use anyhow::Result;

use super::user_entity::{NewUserEntity, UserEntity};

/// Storage operations for users.
pub trait UserDbAdapterTrait: Send + Sync {
    fn find_by_id(&self, id: i32) -> Result<Option<UserEntity>>;

    fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>>;

    /// All users ordered by id.
    fn list(&self) -> Result<Vec<UserEntity>>;

    /// Fails with `AppError::BadRequest` when the email is already taken.
    fn insert(&self, data: &NewUserEntity) -> Result<UserEntity>;
}
