use axum::{extract::State, http::StatusCode, response::Response, Extension};
use pricedesk_core::{
    AccessToken, CatalogItem, CatalogSession, CatalogSnapshot, Envelope, FailureKind, PriceChange,
    PricePolicy,
};
use pricedesk_upstream::UpstreamClient;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::middleware::{ApiJson, ApiQuery, Bearer, RequestId};

use super::{respond, AppState};

const LEGACY_TOP_N: usize = 3;

#[derive(Debug, Deserialize)]
pub(super) struct TopQuery {
    pub category: Option<String>,
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RaisePricesBody {
    pub percentage_increase: Decimal,
    pub category: Option<String>,
    pub count: Option<usize>,
}

fn session(state: &AppState, token: AccessToken) -> CatalogSession<'_, UpstreamClient> {
    CatalogSession::new(state.client.as_ref(), token)
        .with_page_size(state.config.page_size as usize)
}

/// A failed selection means the catalog could not be read at all. That is
/// the caller's problem when the upstream refused their token.
fn selection_status(
    snapshot: &CatalogSnapshot,
    envelope: &Envelope<Vec<CatalogItem>>,
) -> StatusCode {
    if envelope.success {
        StatusCode::OK
    } else if snapshot.failure_kind() == Some(FailureKind::Auth) {
        StatusCode::UNAUTHORIZED
    } else {
        StatusCode::BAD_GATEWAY
    }
}

/// `GET /api/products/top?category=..&count=..`
pub(super) async fn top_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Bearer(token): Bearer,
    ApiQuery(query): ApiQuery<TopQuery>,
) -> Response {
    let category = query
        .category
        .unwrap_or_else(|| state.config.default_category.clone());
    let count = query.count.unwrap_or(state.config.default_top_n);
    tracing::info!(request_id = %req_id.0, category, count, "top products requested");

    let snapshot = session(&state, token).fetch_catalog().await;
    let envelope = snapshot.top_items(&category, count);
    respond(selection_status(&snapshot, &envelope), envelope)
}

/// `GET /api/smartphones/top-three`
pub(super) async fn top_three(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Bearer(token): Bearer,
) -> Response {
    let category = state.config.default_category.clone();
    tracing::info!(request_id = %req_id.0, category, "legacy top-three requested");

    let snapshot = session(&state, token).fetch_catalog().await;
    let envelope = snapshot.top_items(&category, LEGACY_TOP_N);
    respond(selection_status(&snapshot, &envelope), envelope)
}

/// `PUT /api/products/prices` and `PUT /api/smartphones/update-prices`
///
/// Status mapping: malformed body or out-of-policy percentage 400; refused
/// token 401; unreadable catalog 502; nothing matched 400; every update
/// failed 502; otherwise 200.
pub(super) async fn raise_prices(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Bearer(token): Bearer,
    ApiJson(body): ApiJson<RaisePricesBody>,
) -> Response {
    let policy = PricePolicy::with_max(state.config.max_percentage);
    let percentage = match policy.check_percentage(body.percentage_increase) {
        Ok(p) => p,
        Err(e) => {
            tracing::info!(request_id = %req_id.0, error = %e, "price raise rejected");
            return respond(
                StatusCode::BAD_REQUEST,
                Envelope::<Vec<PriceChange>>::failure("Invalid percentage", vec![e.to_string()]),
            );
        }
    };

    let category = body
        .category
        .unwrap_or_else(|| state.config.default_category.clone());
    let count = body.count.unwrap_or(state.config.default_top_n);
    tracing::info!(
        request_id = %req_id.0,
        category,
        count,
        %percentage,
        "price raise requested"
    );

    let catalog = session(&state, token);
    let snapshot = catalog.fetch_catalog().await;
    let selection = snapshot.top_items(&category, count);
    if !selection.success {
        return respond(
            selection_status(&snapshot, &selection),
            Envelope::<Vec<PriceChange>>::failure(selection.message, selection.errors),
        );
    }

    let items = selection.data.unwrap_or_default();
    let envelope = catalog
        .raise_prices(&items, percentage, selection.errors)
        .await;

    let status = match &envelope.data {
        None => StatusCode::BAD_REQUEST,
        Some(changes) if changes.is_empty() => StatusCode::BAD_GATEWAY,
        Some(_) => StatusCode::OK,
    };
    respond(status, envelope)
}
