use pricedesk_core::{AccessToken, CatalogItem, CatalogTransport, Page};
use rust_decimal::Decimal;

use super::{read_json, UpstreamClient};
use crate::error::UpstreamError;
use crate::retry::retry_with_backoff;
use crate::types::{PriceUpdate, ProductsResponse};

impl CatalogTransport for UpstreamClient {
    type Error = UpstreamError;

    async fn get_page(
        &self,
        token: &AccessToken,
        offset: usize,
        limit: usize,
        fields: &[&str],
    ) -> Result<Page, UpstreamError> {
        let url = self.products_url(offset, limit, fields)?;
        tracing::debug!(offset, limit, "fetching catalog page");

        let parsed: ProductsResponse =
            retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
                let url = url.clone();
                async move {
                    let response = self
                        .client
                        .get(&url)
                        .bearer_auth(token.as_str())
                        .send()
                        .await?;
                    read_json(response, &url, "catalog page").await
                }
            })
            .await?;

        let items = parsed.products.ok_or_else(|| UpstreamError::MissingField {
            field: "products",
            url,
        })?;

        Ok(Page {
            items,
            total: parsed.total,
            offset,
            limit,
        })
    }

    async fn put_price(
        &self,
        token: &AccessToken,
        item_id: i64,
        new_price: Decimal,
    ) -> Result<CatalogItem, UpstreamError> {
        let url = self.product_url(item_id)?;
        let body = PriceUpdate { price: new_price };
        tracing::debug!(item_id, %new_price, "writing price");

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let body = &body;
            async move {
                let response = self
                    .client
                    .put(&url)
                    .bearer_auth(token.as_str())
                    .json(body)
                    .send()
                    .await?;
                read_json(response, &url, "price update response").await
            }
        })
        .await
    }
}
