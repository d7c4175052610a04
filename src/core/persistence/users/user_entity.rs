use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;

use crate::core::persistence::schema::users;

/// Row in `users`.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserEntity {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserEntity {
    pub username: String,
    pub email: String,
    pub hashed_password: String,
}
