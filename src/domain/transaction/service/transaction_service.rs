use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use crate::api::dto::paginated_response::PaginatedResponse;
use crate::api::dto::transaction_dto::{TransactionListQuery, TransactionSummaryQuery};
use crate::core::persistence::transactions::transaction_api_repository_trait::TransactionApiRepository;
use crate::core::persistence::transactions::transaction_entity::{
    normalize_category, normalize_string, NewTransactionEntity, TransactionEntity,
};
use crate::core::persistence::transactions::transaction_filter::TransactionFilter;
use crate::core::persistence::transactions::transaction_kind::TransactionKind;
use crate::core::util::blocking::run_blocking;
use crate::domain::transaction::dto::transaction_create_request::TransactionCreateRequest;
use crate::domain::transaction::dto::transaction_patch_request::TransactionPatchRequest;
use crate::domain::transaction::dto::transaction_summary::{CategoryTotal, TransactionSummary};
use crate::errors::AppError;

pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 200;
pub const DEFAULT_SUMMARY_DAYS: i64 = 30;

const NOT_FOUND: &str = "Transaction not found";
const BLANK_CATEGORY: &str = "Category must not be blank";
const TOTALS_OUT_OF_RANGE: &str = "Totals exceed the supported amount range";

pub struct TransactionService {
    repo: Arc<dyn TransactionApiRepository>,
}

impl TransactionService {
    pub fn new(repo: Arc<dyn TransactionApiRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, user_id: i32, req: TransactionCreateRequest) -> Result<TransactionEntity> {
        req.validate()?;

        let category = normalize_category(&req.category)
            .ok_or_else(|| AppError::BadRequest(BLANK_CATEGORY.into()))?;

        let new_row = NewTransactionEntity {
            user_id,
            kind: req.kind.as_code().to_string(),
            amount_minor: req.amount_minor,
            category,
            description: req.description.and_then(normalize_string),
            occurred_at: req.occurred_at.unwrap_or_else(Utc::now),
        };

        let repo = self.repo.clone();
        let created = run_blocking(move || repo.insert(&new_row)).await?;
        info!(user_id, transaction_id = created.id, "Transaction recorded");
        Ok(created)
    }

    pub async fn list(
        &self,
        user_id: i32,
        query: TransactionListQuery,
    ) -> Result<PaginatedResponse<TransactionEntity>> {
        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(AppError::BadRequest("`from` must not be after `to`".into()).into());
            }
        }

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = query.offset.unwrap_or(0);
        let db_offset = i64::try_from(offset)
            .map_err(|_| AppError::BadRequest("`offset` is too large".into()))?;
        let filter = TransactionFilter {
            kind: query.kind,
            category: query.category.as_deref().and_then(normalize_category),
            from: query.from,
            to: query.to,
            limit: limit as i64,
            offset: db_offset,
        };

        let repo = self.repo.clone();
        let (items, total) = run_blocking(move || repo.list_for_user(user_id, &filter)).await?;

        Ok(PaginatedResponse {
            items,
            total: total.max(0) as usize,
            limit,
            offset,
        })
    }

    pub async fn get(&self, user_id: i32, id: i32) -> Result<TransactionEntity> {
        let repo = self.repo.clone();
        run_blocking(move || repo.find_for_user(user_id, id))
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()).into())
    }

    pub async fn patch(
        &self,
        user_id: i32,
        id: i32,
        req: TransactionPatchRequest,
    ) -> Result<TransactionEntity> {
        req.validate()?;
        if req.category.as_deref().is_some_and(|c| normalize_category(c).is_none()) {
            return Err(AppError::BadRequest(BLANK_CATEGORY.into()).into());
        }

        let mut row = self.get(user_id, id).await?;
        row.apply_patch(req);

        let repo = self.repo.clone();
        run_blocking(move || repo.update(&row))
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()).into())
    }

    pub async fn delete(&self, user_id: i32, id: i32) -> Result<Value> {
        let repo = self.repo.clone();
        if !run_blocking(move || repo.delete_for_user(user_id, id)).await? {
            return Err(AppError::NotFound(NOT_FOUND.into()).into());
        }
        info!(user_id, transaction_id = id, "Transaction deleted");
        Ok(json!({ "deleted": id }))
    }

    pub async fn summary(&self, user_id: i32, query: TransactionSummaryQuery) -> Result<TransactionSummary> {
        let (from, to) = resolve_range(query.from, query.to, Utc::now())?;
        let (summary, _) = self.summary_with_rows(user_id, from, to).await?;
        Ok(summary)
    }

    /// Summary plus the rows it was built from (newest first).
    pub async fn summary_with_rows(
        &self,
        user_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<(TransactionSummary, Vec<TransactionEntity>)> {
        let repo = self.repo.clone();
        let rows = run_blocking(move || repo.list_in_range(user_id, from, to)).await?;
        Ok((summarize(&rows, from, to)?, rows))
    }
}

/// Missing bounds default to the last `DEFAULT_SUMMARY_DAYS` ending now.
pub fn resolve_range(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let to = to.unwrap_or(now);
    let from = from.unwrap_or(to - Duration::days(DEFAULT_SUMMARY_DAYS));
    if from > to {
        return Err(AppError::BadRequest("`from` must not be after `to`".into()).into());
    }
    Ok((from, to))
}

/// Totals use checked arithmetic; a window whose sums leave `i64` is a 400.
pub fn summarize(
    rows: &[TransactionEntity],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<TransactionSummary> {
    let out_of_range = || AppError::BadRequest(TOTALS_OUT_OF_RANGE.into());

    let mut total_income_minor = 0i64;
    let mut total_expense_minor = 0i64;
    let mut groups: HashMap<(String, TransactionKind), (i64, usize)> = HashMap::new();

    for row in rows {
        let Some(kind) = row.transaction_kind() else {
            continue;
        };
        let total = match kind {
            TransactionKind::Income => &mut total_income_minor,
            TransactionKind::Expense => &mut total_expense_minor,
        };
        *total = total.checked_add(row.amount_minor).ok_or_else(out_of_range)?;

        let entry = groups.entry((row.category.clone(), kind)).or_insert((0, 0));
        entry.0 = entry.0.checked_add(row.amount_minor).ok_or_else(out_of_range)?;
        entry.1 += 1;
    }

    let mut by_category: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|((category, kind), (total_minor, count))| CategoryTotal {
            category,
            kind,
            total_minor,
            count,
        })
        .collect();
    by_category.sort_by(|a, b| {
        b.total_minor
            .cmp(&a.total_minor)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.kind.cmp(&b.kind))
    });

    let net_minor = total_income_minor
        .checked_sub(total_expense_minor)
        .ok_or_else(out_of_range)?;

    Ok(TransactionSummary {
        from,
        to,
        total_income_minor,
        total_expense_minor,
        net_minor,
        transaction_count: rows.len(),
        by_category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::dto::transaction_create_request::MAX_AMOUNT_MINOR;
    use crate::testing::MemoryTransactionRepository;
    use chrono::TimeZone;
    use serde_json::json;

    fn service() -> TransactionService {
        TransactionService::new(Arc::new(MemoryTransactionRepository::default()))
    }

    fn create_req(kind: &str, amount: i64, category: &str, day: u32) -> TransactionCreateRequest {
        serde_json::from_value(json!({
            "kind": kind,
            "amount_minor": amount,
            "category": category,
            "occurred_at": Utc.with_ymd_and_hms(2025, 3, day, 10, 0, 0).unwrap(),
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn create_normalizes_and_defaults() {
        let svc = service();
        let req: TransactionCreateRequest = serde_json::from_value(json!({
            "kind": "expense",
            "amount_minor": 25000,
            "category": "  Groceries ",
            "description": "   "
        }))
        .unwrap();

        let row = svc.create(1, req).await.unwrap();
        assert_eq!(row.category, "groceries");
        assert_eq!(row.kind, "expense");
        assert!(row.description.is_none());
        assert!(Utc::now() - row.occurred_at < Duration::minutes(1));
    }

    #[tokio::test]
    async fn create_rejects_non_positive_amount() {
        let svc = service();
        let err: AppError = svc
            .create(1, create_req("income", 0, "salary", 1))
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn list_is_scoped_filtered_and_paginated() {
        let svc = service();
        svc.create(1, create_req("income", 5_000_000, "salary", 1)).await.unwrap();
        svc.create(1, create_req("expense", 20_000, "food", 2)).await.unwrap();
        svc.create(1, create_req("expense", 30_000, "food", 3)).await.unwrap();
        svc.create(2, create_req("expense", 99_999, "food", 3)).await.unwrap();

        let page = svc
            .list(
                1,
                TransactionListQuery {
                    kind: Some(TransactionKind::Expense),
                    limit: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.limit, 1);
        assert_eq!(page.items.len(), 1);
        // newest first
        assert_eq!(page.items[0].amount_minor, 30_000);

        let clamped = svc
            .list(1, TransactionListQuery { limit: Some(10_000), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(clamped.limit, MAX_LIMIT);
        assert_eq!(clamped.total, 3);
    }

    #[tokio::test]
    async fn other_users_rows_are_not_found() {
        let svc = service();
        let row = svc.create(1, create_req("expense", 100, "misc", 1)).await.unwrap();

        let err: AppError = svc.get(2, row.id).await.unwrap_err().into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = svc.delete(2, row.id).await.unwrap_err().into();
        assert!(matches!(err, AppError::NotFound(_)));

        assert!(svc.get(1, row.id).await.is_ok());
    }

    #[tokio::test]
    async fn patch_updates_only_given_fields() {
        let svc = service();
        let mut req = create_req("expense", 100, "misc", 1);
        req.description = Some("chai".into());
        let row = svc.create(1, req).await.unwrap();

        let patched = svc
            .patch(
                1,
                row.id,
                TransactionPatchRequest {
                    amount_minor: Some(250),
                    description: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.amount_minor, 250);
        assert_eq!(patched.category, "misc");
        assert!(patched.description.is_none());
        assert!(patched.updated_at >= row.updated_at);
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let svc = service();
        let row = svc.create(1, create_req("expense", 100, "misc", 1)).await.unwrap();

        let resp = svc.delete(1, row.id).await.unwrap();
        assert_eq!(resp["deleted"], row.id);
        assert!(svc.get(1, row.id).await.is_err());
    }

    #[tokio::test]
    async fn summary_totals_and_groups() {
        let svc = service();
        svc.create(1, create_req("income", 5_000_000, "salary", 1)).await.unwrap();
        svc.create(1, create_req("expense", 20_000, "food", 2)).await.unwrap();
        svc.create(1, create_req("expense", 30_000, "food", 3)).await.unwrap();
        svc.create(1, create_req("expense", 150_000, "rent", 4)).await.unwrap();
        // outside the window
        svc.create(1, create_req("expense", 1, "food", 20)).await.unwrap();

        let summary = svc
            .summary(
                1,
                TransactionSummaryQuery {
                    from: Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()),
                    to: Some(Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap()),
                },
            )
            .await
            .unwrap();

        assert_eq!(summary.transaction_count, 4);
        assert_eq!(summary.total_income_minor, 5_000_000);
        assert_eq!(summary.total_expense_minor, 200_000);
        assert_eq!(summary.net_minor, 4_800_000);

        let order: Vec<(&str, i64, usize)> = summary
            .by_category
            .iter()
            .map(|c| (c.category.as_str(), c.total_minor, c.count))
            .collect();
        assert_eq!(
            order,
            vec![("salary", 5_000_000, 1), ("rent", 150_000, 1), ("food", 50_000, 2)]
        );
    }

    fn row(id: i32, kind: &str, amount_minor: i64, category: &str) -> TransactionEntity {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        TransactionEntity {
            id,
            user_id: 1,
            kind: kind.into(),
            amount_minor,
            category: category.into(),
            description: None,
            occurred_at: at,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn create_rejects_amount_above_cap() {
        let svc = service();
        let err: AppError = svc
            .create(1, create_req("expense", MAX_AMOUNT_MINOR + 1, "misc", 1))
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(svc.create(1, create_req("expense", MAX_AMOUNT_MINOR, "misc", 1)).await.is_ok());
    }

    #[test]
    fn summarize_rejects_totals_outside_i64() {
        let now = Utc::now();
        let rows = vec![row(1, "expense", i64::MAX, "rent"), row(2, "expense", i64::MAX, "rent")];
        let err: AppError = summarize(&rows, now, now).unwrap_err().into();
        assert!(matches!(err, AppError::BadRequest(_)));

        // per-category sums fit, the kind total does not
        let rows = vec![row(1, "expense", i64::MAX, "rent"), row(2, "expense", 1, "food")];
        assert!(summarize(&rows, now, now).is_err());
        let rows = vec![row(1, "income", 0, "x"), row(2, "expense", i64::MAX, "rent")];
        let summary = summarize(&rows, now, now).unwrap();
        assert_eq!(summary.net_minor, -i64::MAX);
    }

    #[tokio::test]
    async fn summary_of_capped_amounts_does_not_overflow() {
        let svc = service();
        for day in 1..=5 {
            svc.create(1, create_req("expense", MAX_AMOUNT_MINOR, "rent", day)).await.unwrap();
        }

        let summary = svc
            .summary(
                1,
                TransactionSummaryQuery {
                    from: Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()),
                    to: Some(Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap()),
                },
            )
            .await
            .unwrap();
        assert_eq!(summary.total_expense_minor, 5 * MAX_AMOUNT_MINOR);
        assert_eq!(summary.net_minor, -5 * MAX_AMOUNT_MINOR);
    }

    #[test]
    fn summarize_breaks_ties_by_category_then_kind() {
        let now = Utc::now();
        let rows = vec![
            row(1, "expense", 500, "travel"),
            row(2, "expense", 500, "books"),
            row(3, "income", 500, "books"),
            row(4, "expense", 900, "rent"),
        ];

        let summary = summarize(&rows, now, now).unwrap();
        let order: Vec<(&str, TransactionKind)> = summary
            .by_category
            .iter()
            .map(|c| (c.category.as_str(), c.kind))
            .collect();
        assert_eq!(
            order,
            vec![
                ("rent", TransactionKind::Expense),
                ("books", TransactionKind::Income),
                ("books", TransactionKind::Expense),
                ("travel", TransactionKind::Expense),
            ]
        );
    }

    #[tokio::test]
    async fn patch_rejects_blank_category() {
        let svc = service();
        let row = svc.create(1, create_req("expense", 100, "Food", 1)).await.unwrap();

        let err: AppError = svc
            .patch(
                1,
                row.id,
                TransactionPatchRequest {
                    category: Some("   ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Category must not be blank"));

        let unchanged = svc.get(1, row.id).await.unwrap();
        assert_eq!(unchanged, row);
    }

    #[tokio::test]
    async fn list_filters_by_range_and_pages_by_offset() {
        let svc = service();
        for day in 1..=6 {
            svc.create(1, create_req("expense", 100 * day as i64, "misc", day)).await.unwrap();
        }

        let in_range = TransactionListQuery {
            from: Some(Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2025, 3, 5, 23, 0, 0).unwrap()),
            ..Default::default()
        };
        let page = svc.list(1, in_range).await.unwrap();
        let amounts: Vec<i64> = page.items.iter().map(|r| r.amount_minor).collect();
        assert_eq!(page.total, 4);
        assert_eq!(amounts, vec![500, 400, 300, 200]);

        let second_page = svc
            .list(1, TransactionListQuery { limit: Some(2), offset: Some(2), ..Default::default() })
            .await
            .unwrap();
        let amounts: Vec<i64> = second_page.items.iter().map(|r| r.amount_minor).collect();
        assert_eq!(second_page.total, 6);
        assert_eq!(second_page.offset, 2);
        assert_eq!(amounts, vec![400, 300]);

        let past_end = svc
            .list(1, TransactionListQuery { offset: Some(100), ..Default::default() })
            .await
            .unwrap();
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 6);
    }

    #[tokio::test]
    async fn list_rejects_inverted_range_and_unrepresentable_offset() {
        let svc = service();

        let inverted = TransactionListQuery {
            from: Some(Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let err: AppError = svc.list(1, inverted).await.unwrap_err().into();
        assert!(matches!(err, AppError::BadRequest(_)));

        let huge = TransactionListQuery { offset: Some(usize::MAX), ..Default::default() };
        let err: AppError = svc.list(1, huge).await.unwrap_err().into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn resolve_range_defaults_and_rejects_inverted() {
        let now = Utc.with_ymd_and_hms(2025, 3, 31, 0, 0, 0).unwrap();

        let (from, to) = resolve_range(None, None, now).unwrap();
        assert_eq!(to, now);
        assert_eq!(to - from, Duration::days(DEFAULT_SUMMARY_DAYS));

        let later = now + Duration::days(1);
        assert!(resolve_range(Some(later), Some(now), now).is_err());
    }
}
