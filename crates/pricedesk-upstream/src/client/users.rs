use pricedesk_core::AccessToken;

use super::{read_json, UpstreamClient};
use crate::error::UpstreamError;
use crate::retry::retry_with_backoff;
use crate::types::{UserSummary, UsersResponse};

impl UpstreamClient {
    /// Lists upstream users as public summaries.
    ///
    /// Returns `Ok(None)` when the upstream answers without a `users`
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on transport failure, a non-2xx status, or
    /// a malformed body.
    pub async fn list_users(
        &self,
        token: &AccessToken,
    ) -> Result<Option<Vec<UserSummary>>, UpstreamError> {
        let url = self.users_url()?;
        let parsed: UsersResponse =
            retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
                let url = url.clone();
                async move {
                    let response = self
                        .client
                        .get(&url)
                        .bearer_auth(token.as_str())
                        .send()
                        .await?;
                    read_json(response, &url, "user list").await
                }
            })
            .await?;
        Ok(parsed.users)
    }
}
