use std::sync::Arc;
use std::time::Duration;

use crate::core::cache::cache_store_trait::CacheStore;
use crate::core::client::llm::llm_client_trait::LlmClient;
use crate::core::config::settings::Settings;
use crate::core::persistence::db::connection::DbPool;
use crate::core::persistence::transactions::transaction_api_repository_trait::TransactionApiRepository;
use crate::core::persistence::transactions::transaction_repository::TransactionRepository;
use crate::core::persistence::users::user_api_repository_trait::UserApiRepository;
use crate::core::persistence::users::user_repository::UserRepository;
use crate::core::security::jwt::TokenIssuer;
use crate::domain::insight::service::insight_service::InsightService;
use crate::domain::session::service::session_service::SessionService;
use crate::domain::system::service::status_service::SystemService;
use crate::domain::transaction::service::transaction_service::TransactionService;
use crate::domain::user::service::auth_service::AuthService;
use crate::domain::user::service::user_service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub transaction_service: Arc<TransactionService>,
    pub insight_service: Arc<InsightService>,
    pub system_service: Arc<SystemService>,
}

/// Production wiring: Postgres repositories over the shared pool.
pub fn build_app_state_with_pool(
    settings: Arc<Settings>,
    pool: DbPool,
    cache: Arc<dyn CacheStore>,
    llm: Arc<dyn LlmClient>,
) -> AppState {
    build_app_state(
        settings,
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(TransactionRepository::new(pool.clone())),
        cache,
        llm,
        Some(pool),
    )
}

pub fn build_app_state(
    settings: Arc<Settings>,
    users: Arc<dyn UserApiRepository>,
    transactions: Arc<dyn TransactionApiRepository>,
    cache: Arc<dyn CacheStore>,
    llm: Arc<dyn LlmClient>,
    pool: Option<DbPool>,
) -> AppState {
    let user_service = Arc::new(UserService::new(users, settings.bcrypt_cost));
    let auth_service = Arc::new(AuthService::new(
        user_service.clone(),
        TokenIssuer::new(&settings.secret_key, settings.access_token_expire_minutes),
        SessionService::new(cache.clone()),
    ));
    let transaction_service = Arc::new(TransactionService::new(transactions));
    let insight_service = Arc::new(InsightService::new(
        transaction_service.clone(),
        llm.clone(),
        cache.clone(),
        Duration::from_secs(settings.insight_cache_ttl_secs),
    ));
    let system_service = Arc::new(SystemService::new(pool, cache, llm, settings.llm.provider));

    AppState {
        settings,
        user_service,
        auth_service,
        transaction_service,
        insight_service,
        system_service,
    }
}
