use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::core::persistence::db::connection::{DbConnection, DbPool};
use crate::core::persistence::schema::users::dsl;
use crate::errors::AppError;

use super::user_db_adapter_trait::UserDbAdapterTrait;
use super::user_entity::{NewUserEntity, UserEntity};

/// Diesel adapter for the `users` table.
pub struct UserPgAdapter {
    pool: DbPool,
}

impl UserPgAdapter {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConnection> {
        self.pool.get().context("Failed to get database connection")
    }
}

impl UserDbAdapterTrait for UserPgAdapter {
    fn find_by_id(&self, id: i32) -> Result<Option<UserEntity>> {
        let mut conn = self.conn()?;
        dsl::users
            .find(id)
            .select(UserEntity::as_select())
            .first(&mut conn)
            .optional()
            .context("Failed to load user by id")
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>> {
        let mut conn = self.conn()?;
        dsl::users
            .filter(dsl::email.eq(email))
            .select(UserEntity::as_select())
            .first(&mut conn)
            .optional()
            .context("Failed to load user by email")
    }

    fn list(&self) -> Result<Vec<UserEntity>> {
        let mut conn = self.conn()?;
        dsl::users
            .order(dsl::id.asc())
            .select(UserEntity::as_select())
            .load(&mut conn)
            .context("Failed to list users")
    }

    fn insert(&self, data: &NewUserEntity) -> Result<UserEntity> {
        let mut conn = self.conn()?;
        diesel::insert_into(dsl::users)
            .values(data)
            .returning(UserEntity::as_returning())
            .get_result(&mut conn)
            .map_err(|e| match e {
                // Lost the race against a concurrent registration
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    anyhow::Error::from(AppError::BadRequest(
                        "Email already registered".into(),
                    ))
                }
                other => anyhow::Error::new(other).context("Failed to insert user"),
            })
    }
}
