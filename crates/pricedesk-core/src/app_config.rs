use std::net::SocketAddr;

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub upstream_base_url: String,
    pub upstream_timeout_secs: u64,
    pub upstream_user_agent: String,
    pub upstream_max_retries: u32,
    pub upstream_retry_backoff_base_ms: u64,
    pub page_size: u32,
    pub token_expires_mins: u32,
    pub default_category: String,
    pub default_top_n: usize,
    pub max_percentage: Decimal,
    pub cors_origins: Vec<String>,
}
