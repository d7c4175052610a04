use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::core::cache::cache_store_trait::{cache_key, CacheStore};
use crate::core::client::llm::llm_client_trait::{LlmClient, LlmMessage};
use crate::core::persistence::transactions::transaction_entity::TransactionEntity;
use crate::core::persistence::transactions::transaction_kind::TransactionKind;
use crate::core::util::money_util::MoneyUtil;
use crate::domain::insight::dto::insight_request::InsightRequest;
use crate::domain::insight::dto::insight_response::InsightResponse;
use crate::domain::transaction::dto::transaction_summary::TransactionSummary;
use crate::domain::transaction::service::transaction_service::TransactionService;
use crate::errors::AppError;

pub const DEFAULT_WINDOW_DAYS: u32 = 30;
const MAX_RECENT_TRANSACTIONS: usize = 20;
const MAX_CONTEXT_CHARS: usize = 4000;

const SYSTEM_PROMPT: &str = "You are DhanSaathi, a personal finance companion for users in India. \
Using only the figures provided, give 3 to 5 short, practical observations about the user's \
spending and saving, with amounts in rupees. Do not invent numbers and do not recommend \
specific financial products.";

pub struct InsightService {
    transactions: Arc<TransactionService>,
    llm: Arc<dyn LlmClient>,
    cache: Arc<dyn CacheStore>,
    cache_ttl: Duration,
}

impl InsightService {
    pub fn new(
        transactions: Arc<TransactionService>,
        llm: Arc<dyn LlmClient>,
        cache: Arc<dyn CacheStore>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            transactions,
            llm,
            cache,
            cache_ttl,
        }
    }

    pub async fn generate(&self, user_id: i32, req: InsightRequest) -> Result<InsightResponse> {
        req.validate()?;

        let window_days = req.window_days.unwrap_or(DEFAULT_WINDOW_DAYS);
        let to = Utc::now();
        let from = to - chrono::Duration::days(window_days as i64);
        let (summary, rows) = self.transactions.summary_with_rows(user_id, from, to).await?;

        if summary.transaction_count == 0 {
            return Ok(InsightResponse {
                insight: format!(
                    "No transactions recorded in the last {} days. Add some income and expenses to get insights.",
                    window_days
                ),
                model: None,
                window_days,
                generated_at: Utc::now(),
                cached: false,
            });
        }

        let question = req.question.as_deref().map(str::trim).filter(|q| !q.is_empty());
        let key = question
            .is_none()
            .then(|| insight_cache_key(user_id, window_days, &summary));

        if let Some(key) = &key {
            if let Some(hit) = self.read_cached(key).await {
                debug!(user_id, window_days, "Insight served from cache");
                return Ok(hit);
            }
        }

        if !self.llm.is_configured() {
            return Err(AppError::ServiceUnavailable(
                "AI insights are not configured on this server".into(),
            )
            .into());
        }

        let messages = vec![
            LlmMessage::system(SYSTEM_PROMPT),
            LlmMessage::user(build_context(&summary, &rows, window_days, question)),
        ];
        let completion = self.llm.complete(messages).await?;
        info!(user_id, window_days, model = %completion.model, "Insight generated");

        let response = InsightResponse {
            insight: completion.content,
            model: Some(completion.model),
            window_days,
            generated_at: Utc::now(),
            cached: false,
        };

        if let Some(key) = &key {
            self.write_cached(key, &response).await;
        }

        Ok(response)
    }

    /// Cache failures degrade to a miss.
    async fn read_cached(&self, key: &str) -> Option<InsightResponse> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => serde_json::from_str::<InsightResponse>(&raw)
                .ok()
                .map(|mut hit| {
                    hit.cached = true;
                    hit
                }),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Insight cache read failed");
                None
            }
        }
    }

    async fn write_cached(&self, key: &str, response: &InsightResponse) {
        let raw = match serde_json::to_string(response) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to serialize insight for cache");
                return;
            }
        };
        if let Err(e) = self.cache.set_ex(key, &raw, self.cache_ttl).await {
            warn!(error = %e, "Insight cache write failed");
        }
    }
}

/// Any change to the window's data produces a different key.
fn insight_cache_key(user_id: i32, window_days: u32, summary: &TransactionSummary) -> String {
    cache_key(&[
        "insight",
        &user_id.to_string(),
        &window_days.to_string(),
        &summary.transaction_count.to_string(),
        &summary.total_income_minor.to_string(),
        &summary.total_expense_minor.to_string(),
    ])
}

fn build_context(
    summary: &TransactionSummary,
    rows: &[TransactionEntity],
    window_days: u32,
    question: Option<&str>,
) -> String {
    let mut sections = Vec::new();

    sections.push(format!(
        "Summary for the last {} days: income {}, expenses {}, net {}, {} transactions.",
        window_days,
        MoneyUtil::format_inr(summary.total_income_minor),
        MoneyUtil::format_inr(summary.total_expense_minor),
        MoneyUtil::format_inr(summary.net_minor),
        summary.transaction_count
    ));

    let categories: Vec<String> = summary
        .by_category
        .iter()
        .map(|c| {
            let whole = match c.kind {
                TransactionKind::Income => summary.total_income_minor,
                TransactionKind::Expense => summary.total_expense_minor,
            };
            format!(
                "- {} ({}): {} across {} entries, {:.1}% of {}",
                c.category,
                c.kind.as_code(),
                MoneyUtil::format_inr(c.total_minor),
                c.count,
                MoneyUtil::percent_of(c.total_minor, whole),
                c.kind.as_code()
            )
        })
        .collect();
    sections.push(format!("By category:\n{}", categories.join("\n")));

    let recent: Vec<String> = rows
        .iter()
        .take(MAX_RECENT_TRANSACTIONS)
        .map(|t| {
            format!(
                "- {} {} {} {}{}",
                t.occurred_at.format("%Y-%m-%d"),
                t.kind,
                MoneyUtil::format_inr(t.amount_minor),
                t.category,
                t.description
                    .as_deref()
                    .map(|d| format!(" ({})", d))
                    .unwrap_or_default()
            )
        })
        .collect();
    sections.push(format!("Recent transactions:\n{}", recent.join("\n")));

    let mut context = trim_str(&sections.join("\n\n"), MAX_CONTEXT_CHARS);
    if let Some(q) = question {
        context.push_str("\n\nQuestion: ");
        context.push_str(q);
    }
    context
}

fn trim_str(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}...<truncated>", &s[..cut]),
    }
}
