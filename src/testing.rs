//! In-memory stand-ins for Postgres and the LLM, used by unit and router tests.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::app_state::{build_app_state, AppState};
use crate::core::cache::memory_cache_store::MemoryCacheStore;
use crate::core::client::llm::llm_client_trait::{LlmClient, LlmCompletion, LlmMessage};
use crate::core::config::settings::Settings;
use crate::core::persistence::transactions::transaction_api_repository_trait::TransactionApiRepository;
use crate::core::persistence::transactions::transaction_db_adapter_trait::TransactionDbAdapterTrait;
use crate::core::persistence::transactions::transaction_entity::{
    NewTransactionEntity, TransactionEntity,
};
use crate::core::persistence::transactions::transaction_filter::TransactionFilter;
use crate::core::persistence::users::user_api_repository_trait::UserApiRepository;
use crate::core::persistence::users::user_db_adapter_trait::UserDbAdapterTrait;
use crate::core::persistence::users::user_entity::{NewUserEntity, UserEntity};
use crate::errors::AppError;

#[derive(Default)]
pub struct MemoryUserAdapter {
    state: Mutex<Vec<UserEntity>>,
}

impl UserDbAdapterTrait for MemoryUserAdapter {
    fn find_by_id(&self, id: i32) -> Result<Option<UserEntity>> {
        Ok(self.state.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    fn list(&self) -> Result<Vec<UserEntity>> {
        Ok(self.state.lock().unwrap().clone())
    }

    fn insert(&self, data: &NewUserEntity) -> Result<UserEntity> {
        let mut users = self.state.lock().unwrap();
        if users.iter().any(|u| u.email == data.email) {
            return Err(AppError::BadRequest("Email already registered".into()).into());
        }
        let user = UserEntity {
            id: users.len() as i32 + 1,
            username: data.username.clone(),
            email: data.email.clone(),
            hashed_password: data.hashed_password.clone(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    adapter: MemoryUserAdapter,
}

impl UserApiRepository for MemoryUserRepository {
    fn db_adapter(&self) -> &dyn UserDbAdapterTrait {
        &self.adapter
    }
}

#[derive(Default)]
pub struct MemoryTransactionAdapter {
    state: Mutex<Vec<TransactionEntity>>,
}

impl MemoryTransactionAdapter {
    fn sorted_newest_first(mut rows: Vec<TransactionEntity>) -> Vec<TransactionEntity> {
        rows.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at).then(b.id.cmp(&a.id)));
        rows
    }
}

/// In-memory rendering of the filtered query built by the Postgres adapter.
fn filter_matches(filter: &TransactionFilter, row: &TransactionEntity) -> bool {
    filter.kind.map_or(true, |k| k.as_code() == row.kind)
        && filter.category.as_deref().map_or(true, |c| c == row.category)
        && filter.from.map_or(true, |from| row.occurred_at >= from)
        && filter.to.map_or(true, |to| row.occurred_at <= to)
}

impl TransactionDbAdapterTrait for MemoryTransactionAdapter {
    fn insert(&self, data: &NewTransactionEntity) -> Result<TransactionEntity> {
        let mut rows = self.state.lock().unwrap();
        let now = Utc::now();
        let row = TransactionEntity {
            id: rows.iter().map(|r| r.id).max().unwrap_or(0) + 1,
            user_id: data.user_id,
            kind: data.kind.clone(),
            amount_minor: data.amount_minor,
            category: data.category.clone(),
            description: data.description.clone(),
            occurred_at: data.occurred_at,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    fn find_for_user(&self, user_id: i32, id: i32) -> Result<Option<TransactionEntity>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    fn list_for_user(
        &self,
        user_id: i32,
        filter: &TransactionFilter,
    ) -> Result<(Vec<TransactionEntity>, i64)> {
        let matching: Vec<TransactionEntity> = self
            .state
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && filter_matches(filter, r))
            .cloned()
            .collect();
        let total = matching.len() as i64;
        let page = Self::sorted_newest_first(matching)
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect();
        Ok((page, total))
    }

    fn list_in_range(
        &self,
        user_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TransactionEntity>> {
        let rows = self
            .state
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && r.occurred_at >= from && r.occurred_at <= to)
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(rows))
    }

    fn update(&self, data: &TransactionEntity) -> Result<Option<TransactionEntity>> {
        let mut rows = self.state.lock().unwrap();
        match rows
            .iter_mut()
            .find(|r| r.id == data.id && r.user_id == data.user_id)
        {
            Some(row) => {
                *row = data.clone();
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete_for_user(&self, user_id: i32, id: i32) -> Result<bool> {
        let mut rows = self.state.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct MemoryTransactionRepository {
    adapter: MemoryTransactionAdapter,
}

impl TransactionApiRepository for MemoryTransactionRepository {
    fn db_adapter(&self) -> &dyn TransactionDbAdapterTrait {
        &self.adapter
    }
}

/// LLM fake that answers with a fixed string and remembers prompts.
pub struct RecordingLlm {
    answer: Option<String>,
    prompts: Mutex<Vec<Vec<LlmMessage>>>,
}

impl RecordingLlm {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            answer: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Content of the last user message sent.
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .and_then(|messages| messages.iter().rev().find(|m| m.role == "user"))
            .map(|m| m.content.clone())
    }
}

#[async_trait]
impl LlmClient for RecordingLlm {
    fn is_configured(&self) -> bool {
        self.answer.is_some()
    }

    fn model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, messages: Vec<LlmMessage>) -> Result<LlmCompletion> {
        self.prompts.lock().unwrap().push(messages);
        let content = self
            .answer
            .clone()
            .ok_or_else(|| anyhow!("RecordingLlm has no answer"))?;
        Ok(LlmCompletion {
            content,
            model: "test-model".into(),
        })
    }
}

pub fn test_settings() -> Settings {
    let mut settings = Settings::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://test@localhost/test".to_string()),
        "SECRET_KEY" => Some("router-test-secret".to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .expect("test settings");
    settings.insight_cache_ttl_secs = 60;
    settings
}

/// Full application state over in-memory stores.
pub fn test_state(llm: RecordingLlm) -> AppState {
    build_app_state(
        Arc::new(test_settings()),
        Arc::new(MemoryUserRepository::default()),
        Arc::new(MemoryTransactionRepository::default()),
        Arc::new(MemoryCacheStore::new()),
        Arc::new(llm),
        None,
    )
}
