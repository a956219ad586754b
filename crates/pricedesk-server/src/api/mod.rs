mod auth;
mod products;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use pricedesk_core::{AppConfig, Envelope};
use pricedesk_upstream::UpstreamClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, X_REQUEST_ID};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<UpstreamClient>,
    pub config: Arc<AppConfig>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

/// Serializes an envelope with the given status.
pub(super) fn respond<T: Serialize>(status: StatusCode, envelope: Envelope<T>) -> Response {
    (status, Json(envelope)).into_response()
}

/// Builds the CORS layer from configured origins. A `*` entry allows any
/// origin; entries that are not valid header values are skipped.
fn build_cors(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(X_REQUEST_ID),
        ]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(tower_http::cors::Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}

pub fn build_app(state: AppState) -> Router {
    let cors = build_cors(&state.config.cors_origins);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/users", get(auth::list_users))
        .route("/api/products/top", get(products::top_products))
        .route("/api/products/prices", put(products::raise_prices))
        .route("/api/smartphones/top-three", get(products::top_three))
        .route("/api/smartphones/update-prices", put(products::raise_prices))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthData { status: "ok" }))
}
