use pricedesk_core::{AccessToken, AuthenticationClient, Credentials};
use reqwest::StatusCode;

use super::{read_json, UpstreamClient};
use crate::error::UpstreamError;
use crate::retry::retry_with_backoff;
use crate::types::{LoginRequest, LoginResponse};

impl AuthenticationClient for UpstreamClient {
    type Error = UpstreamError;

    /// POSTs to `/auth/login`. The upstream answers bad credentials with
    /// 400, so 400, 401, and 403 all map to [`UpstreamError::Unauthorized`].
    async fn authenticate(
        &self,
        credentials: &Credentials,
        expires_in_mins: u32,
    ) -> Result<AccessToken, UpstreamError> {
        let url = self.login_url()?;
        let body = LoginRequest {
            username: credentials.username(),
            password: credentials.password(),
            expires_in_mins,
        };

        let parsed: LoginResponse =
            retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
                let url = url.clone();
                let body = &body;
                async move {
                    let response = self.client.post(&url).json(body).send().await?;
                    let status = response.status();
                    if matches!(
                        status,
                        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
                    ) {
                        return Err(UpstreamError::Unauthorized {
                            status: status.as_u16(),
                            url,
                        });
                    }
                    read_json(response, &url, "login response").await
                }
            })
            .await?;

        match parsed.access_token {
            Some(token) if !token.is_empty() => Ok(AccessToken::new(token)),
            _ => Err(UpstreamError::MissingField {
                field: "accessToken",
                url,
            }),
        }
    }
}
