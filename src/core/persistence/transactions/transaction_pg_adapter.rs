use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::core::persistence::db::connection::{DbConnection, DbPool};
use crate::core::persistence::schema::transactions::dsl;

use super::transaction_db_adapter_trait::TransactionDbAdapterTrait;
use super::transaction_entity::{NewTransactionEntity, TransactionEntity};
use super::transaction_filter::TransactionFilter;

/// Boxed `transactions` query for one owner with the optional filters applied.
macro_rules! filtered_for_user {
    ($user_id:expr, $filter:expr) => {{
        let filter: &TransactionFilter = $filter;
        let mut query = dsl::transactions
            .filter(dsl::user_id.eq($user_id))
            .into_boxed::<diesel::pg::Pg>();
        if let Some(kind) = filter.kind {
            query = query.filter(dsl::kind.eq(kind.as_code()));
        }
        if let Some(category) = &filter.category {
            query = query.filter(dsl::category.eq(category.clone()));
        }
        if let Some(from) = filter.from {
            query = query.filter(dsl::occurred_at.ge(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(dsl::occurred_at.le(to));
        }
        query
    }};
}

/// Diesel adapter for the `transactions` table.
pub struct TransactionPgAdapter {
    pool: DbPool,
}

impl TransactionPgAdapter {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConnection> {
        self.pool.get().context("Failed to get database connection")
    }
}

impl TransactionDbAdapterTrait for TransactionPgAdapter {
    fn insert(&self, data: &NewTransactionEntity) -> Result<TransactionEntity> {
        let mut conn = self.conn()?;
        diesel::insert_into(dsl::transactions)
            .values(data)
            .returning(TransactionEntity::as_returning())
            .get_result(&mut conn)
            .context("Failed to insert transaction")
    }

    fn find_for_user(&self, user_id: i32, id: i32) -> Result<Option<TransactionEntity>> {
        let mut conn = self.conn()?;
        dsl::transactions
            .filter(dsl::id.eq(id))
            .filter(dsl::user_id.eq(user_id))
            .select(TransactionEntity::as_select())
            .first(&mut conn)
            .optional()
            .context("Failed to load transaction")
    }

    fn list_for_user(
        &self,
        user_id: i32,
        filter: &TransactionFilter,
    ) -> Result<(Vec<TransactionEntity>, i64)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered_for_user!(user_id, filter)
            .count()
            .get_result(&mut conn)
            .context("Failed to count transactions")?;

        let items = filtered_for_user!(user_id, filter)
            .order((dsl::occurred_at.desc(), dsl::id.desc()))
            .limit(filter.limit)
            .offset(filter.offset)
            .select(TransactionEntity::as_select())
            .load(&mut conn)
            .context("Failed to list transactions")?;

        Ok((items, total))
    }

    fn list_in_range(
        &self,
        user_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TransactionEntity>> {
        let mut conn = self.conn()?;
        dsl::transactions
            .filter(dsl::user_id.eq(user_id))
            .filter(dsl::occurred_at.ge(from))
            .filter(dsl::occurred_at.le(to))
            .order((dsl::occurred_at.desc(), dsl::id.desc()))
            .select(TransactionEntity::as_select())
            .load(&mut conn)
            .context("Failed to load transactions in range")
    }

    fn update(&self, data: &TransactionEntity) -> Result<Option<TransactionEntity>> {
        let mut conn = self.conn()?;
        diesel::update(
            dsl::transactions
                .filter(dsl::id.eq(data.id))
                .filter(dsl::user_id.eq(data.user_id)),
        )
        .set((
            dsl::kind.eq(&data.kind),
            dsl::amount_minor.eq(data.amount_minor),
            dsl::category.eq(&data.category),
            dsl::description.eq(&data.description),
            dsl::occurred_at.eq(data.occurred_at),
            dsl::updated_at.eq(data.updated_at),
        ))
        .returning(TransactionEntity::as_returning())
        .get_result(&mut conn)
        .optional()
        .context("Failed to update transaction")
    }

    fn delete_for_user(&self, user_id: i32, id: i32) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            dsl::transactions
                .filter(dsl::id.eq(id))
                .filter(dsl::user_id.eq(user_id)),
        )
        .execute(&mut conn)
        .context("Failed to delete transaction")?;
        Ok(deleted > 0)
    }
}
