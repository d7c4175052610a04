use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tracing::warn;

use crate::core::client::llm::llm_provider::LlmProvider;

pub const FALLBACK_SECRET_KEY: &str = "fallback_secret_key";
/// One year.
pub const MAX_TOKEN_MINUTES: i64 = 60 * 24 * 365;

/// Runtime configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub db_pool_max_size: u32,

    pub secret_key: String,
    pub access_token_expire_minutes: i64,
    pub bcrypt_cost: u32,

    /// `None` keeps the cache in process memory.
    pub redis_url: Option<String>,

    pub host: String,
    pub port: u16,
    pub log_dir: String,
    pub debug_mode: bool,

    pub llm: LlmSettings,
    pub insight_cache_ttl_secs: u64,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_ms: u64,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Gpt,
            api_key: None,
            model: "gpt-4o-mini".into(),
            base_url: None,
            timeout_ms: 30_000,
            max_output_tokens: 512,
            temperature: 0.2,
        }
    }
}

impl LlmSettings {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    /// Mask the key for safe display (keeps last 4 chars).
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|t| {
            let chars: Vec<char> = t.chars().collect();
            if chars.len() <= 8 {
                "***".into()
            } else {
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("***{}", tail)
            }
        })
    }
}

impl Settings {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        Self::from_lookup(|key| map.get(key).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).and_then(normalize_string);

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(&get)?,
        };

        let secret_key = match get("SECRET_KEY") {
            Some(key) => key,
            None => {
                warn!("SECRET_KEY is not set; falling back to the development key");
                FALLBACK_SECRET_KEY.to_string()
            }
        };

        let bcrypt_cost = parse_or(&get, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(anyhow!("BCRYPT_COST must be within 4..=31, got {}", bcrypt_cost));
        }

        let access_token_expire_minutes = parse_or(&get, "ACCESS_TOKEN_EXPIRE_MINUTES", 60i64)?;
        if !(1..=MAX_TOKEN_MINUTES).contains(&access_token_expire_minutes) {
            return Err(anyhow!(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be within 1..={}, got {}",
                MAX_TOKEN_MINUTES,
                access_token_expire_minutes
            ));
        }

        let db_pool_max_size = parse_or(&get, "DB_POOL_MAX_SIZE", 10u32)?;
        if db_pool_max_size == 0 {
            return Err(anyhow!("DB_POOL_MAX_SIZE must be at least 1"));
        }

        let defaults = LlmSettings::default();
        let provider = match get("LLM_PROVIDER") {
            Some(code) => LlmProvider::from_code(&code)
                .ok_or_else(|| anyhow!("Unknown LLM_PROVIDER: {}", code))?,
            None => defaults.provider,
        };

        let llm = LlmSettings {
            provider,
            api_key: get("LLM_API_KEY"),
            model: get("LLM_MODEL").unwrap_or(defaults.model),
            base_url: get("LLM_BASE_URL"),
            timeout_ms: parse_or(&get, "LLM_TIMEOUT_MS", defaults.timeout_ms)?,
            max_output_tokens: parse_or(&get, "LLM_MAX_OUTPUT_TOKENS", defaults.max_output_tokens)?,
            temperature: parse_or(&get, "LLM_TEMPERATURE", defaults.temperature)?,
        };

        Ok(Self {
            database_url,
            db_pool_max_size,
            secret_key,
            access_token_expire_minutes,
            bcrypt_cost,
            redis_url: get("REDIS_URL"),
            host: get("DHANSAATHI_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "DHANSAATHI_PORT", 8000u16)?,
            log_dir: get("DHANSAATHI_LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            debug_mode: parse_or(&get, "DHANSAATHI_DEBUG_MODE", false)?,
            llm,
            insight_cache_ttl_secs: parse_or(&get, "INSIGHT_CACHE_TTL_SECS", 900u64)?,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }

    /// Database URL with the password replaced, for logs.
    pub fn masked_database_url(&self) -> String {
        match (self.database_url.find("://"), self.database_url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let creds = &self.database_url[scheme_end + 3..at];
                let user = creds.split(':').next().unwrap_or_default();
                format!(
                    "{}{}:***{}",
                    &self.database_url[..scheme_end + 3],
                    user,
                    &self.database_url[at..]
                )
            }
            _ => self.database_url.clone(),
        }
    }
}

fn database_url_from_parts<G>(get: &G) -> Result<String>
where
    G: Fn(&str) -> Option<String>,
{
    let host = get("DB_HOST").ok_or_else(|| anyhow!("DATABASE_URL or DB_HOST must be set"))?;
    let name = get("DB_NAME").ok_or_else(|| anyhow!("DB_NAME must be set"))?;
    let user = get("DB_USER").ok_or_else(|| anyhow!("DB_USER must be set"))?;
    let port = get("DB_PORT").unwrap_or_else(|| "5432".to_string());

    Ok(match get("DB_PASS") {
        Some(pass) => format!("postgres://{}:{}@{}:{}/{}", user, pass, host, port, name),
        None => format!("postgres://{}@{}:{}/{}", user, host, port, name),
    })
}

fn parse_or<G, T>(get: &G, key: &str, default: T) -> Result<T>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow!("Invalid value for {}: {} ({})", key, raw, e)),
        None => Ok(default),
    }
}

fn normalize_string(v: String) -> Option<String> {
    let s = v.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
