use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a working
/// development config pointed at the public upstream.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("PRICEDESK_ENV", "development"))?;

    let bind_addr = or_default("PRICEDESK_BIND_ADDR", "0.0.0.0:5000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PRICEDESK_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("PRICEDESK_LOG_LEVEL", "info");

    let upstream_base_url = or_default("PRICEDESK_UPSTREAM_BASE_URL", "https://dummyjson.com");
    if !upstream_base_url.starts_with("http://") && !upstream_base_url.starts_with("https://") {
        return Err(invalid(
            "PRICEDESK_UPSTREAM_BASE_URL",
            format!("\"{upstream_base_url}\" must start with http:// or https://"),
        ));
    }
    let upstream_timeout_secs = parse_u64("PRICEDESK_UPSTREAM_TIMEOUT_SECS", "30")?;
    let upstream_user_agent =
        or_default("PRICEDESK_UPSTREAM_USER_AGENT", "pricedesk/0.1 (catalog-proxy)");
    let upstream_max_retries = parse_u32("PRICEDESK_UPSTREAM_MAX_RETRIES", "2")?;
    let upstream_retry_backoff_base_ms =
        parse_u64("PRICEDESK_UPSTREAM_RETRY_BACKOFF_BASE_MS", "250")?;

    let page_size = parse_u32("PRICEDESK_PAGE_SIZE", "30")?;
    if page_size == 0 {
        return Err(invalid("PRICEDESK_PAGE_SIZE", "must be at least 1".to_string()));
    }
    let token_expires_mins = parse_u32("PRICEDESK_TOKEN_EXPIRES_MINS", "60")?;

    let default_category = or_default("PRICEDESK_DEFAULT_CATEGORY", "smartphones");
    let default_top_n = parse_usize("PRICEDESK_DEFAULT_TOP_N", "3")?;

    let max_percentage = or_default("PRICEDESK_MAX_PERCENTAGE", "1000")
        .parse::<Decimal>()
        .map_err(|e| invalid("PRICEDESK_MAX_PERCENTAGE", e.to_string()))?;
    if max_percentage.is_sign_negative() {
        return Err(invalid(
            "PRICEDESK_MAX_PERCENTAGE",
            "must not be negative".to_string(),
        ));
    }

    let cors_origins = or_default(
        "PRICEDESK_CORS_ORIGINS",
        "http://localhost:3000,https://localhost:3000",
    )
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(ToOwned::to_owned)
    .collect();

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        upstream_base_url,
        upstream_timeout_secs,
        upstream_user_agent,
        upstream_max_retries,
        upstream_retry_backoff_base_ms,
        page_size,
        token_expires_mins,
        default_category,
        default_top_n,
        max_percentage,
        cors_origins,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICEDESK_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}
