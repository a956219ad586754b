//! HTTP client for the upstream catalog service.

mod auth;
mod catalog;
mod users;

use std::time::Duration;

use pricedesk_core::AppConfig;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::UpstreamError;

/// HTTP client for the upstream auth, catalog, and user endpoints.
///
/// Holds no session state: every authenticated call takes the bearer token
/// as an argument. Transient errors (429, 5xx, network failures) are retried
/// with exponential backoff up to `max_retries` additional attempts.
pub struct UpstreamClient {
    pub(super) client: Client,
    pub(super) base_url: String,
    pub(super) max_retries: u32,
    pub(super) backoff_base_ms: u64,
}

impl UpstreamClient {
    /// Creates an `UpstreamClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::InvalidBaseUrl`] if `base_url` is not an absolute
    ///   `http(s)` URL.
    /// - [`UpstreamError::Http`] if the underlying `reqwest::Client` cannot
    ///   be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, UpstreamError> {
        let trimmed = base_url.trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| UpstreamError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(UpstreamError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: trimmed.to_owned(),
            max_retries,
            backoff_base_ms,
        })
    }

    /// Builds a client from the `PRICEDESK_UPSTREAM_*` settings.
    ///
    /// # Errors
    ///
    /// See [`UpstreamClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        Self::new(
            &config.upstream_base_url,
            config.upstream_timeout_secs,
            &config.upstream_user_agent,
            config.upstream_max_retries,
            config.upstream_retry_backoff_base_ms,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, UpstreamError> {
        Url::parse(&format!("{}{path}", self.base_url)).map_err(|e| {
            UpstreamError::InvalidBaseUrl {
                base_url: self.base_url.clone(),
                reason: e.to_string(),
            }
        })
    }

    fn login_url(&self) -> Result<String, UpstreamError> {
        Ok(self.endpoint("/auth/login")?.to_string())
    }

    /// `{base}/auth/products?select=...&limit=...&skip=...`
    fn products_url(
        &self,
        offset: usize,
        limit: usize,
        fields: &[&str],
    ) -> Result<String, UpstreamError> {
        let mut url = self.endpoint("/auth/products")?;
        {
            let mut pairs = url.query_pairs_mut();
            if !fields.is_empty() {
                pairs.append_pair("select", &fields.join(","));
            }
            pairs
                .append_pair("limit", &limit.to_string())
                .append_pair("skip", &offset.to_string());
        }
        Ok(url.to_string())
    }

    fn product_url(&self, item_id: i64) -> Result<String, UpstreamError> {
        Ok(self.endpoint(&format!("/auth/products/{item_id}"))?.to_string())
    }

    fn users_url(&self) -> Result<String, UpstreamError> {
        Ok(self.endpoint("/users")?.to_string())
    }
}

/// Maps a non-2xx status to a typed error and parses a 2xx body as `T`.
///
/// 401 and 403 mean the bearer token was refused.
async fn read_json<T: DeserializeOwned>(
    response: Response,
    url: &str,
    context: &str,
) -> Result<T, UpstreamError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return Err(UpstreamError::RateLimited { retry_after_secs });
    }

    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        tracing::debug!(url, status = status.as_u16(), "upstream refused the bearer token");
        return Err(UpstreamError::Unauthorized {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    if !status.is_success() {
        tracing::debug!(url, status = status.as_u16(), "upstream returned an error status");
        return Err(UpstreamError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str::<T>(&body).map_err(|e| UpstreamError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
