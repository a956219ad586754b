use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::{header::AUTHORIZATION, request::Parts, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use pricedesk_core::{AccessToken, Envelope};
use uuid::Uuid;

/// Header carrying the request id in both directions.
pub const X_REQUEST_ID: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Id of the current request, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Tags each request with an id and echoes it on the response.
///
/// A caller-supplied `x-request-id` is kept when it is non-empty and at most
/// 128 bytes; anything else is replaced with a fresh `UUIDv4`.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);
    let echoed = HeaderValue::from_str(&id).ok();
    req.extensions_mut().insert(RequestId(id));

    let mut res = next.run(req).await;
    if let Some(value) = echoed {
        res.headers_mut().insert(X_REQUEST_ID, value);
    }
    res
}

/// The caller's upstream token, taken from `Authorization: Bearer <token>`.
///
/// The server keeps no tokens of its own; whatever the caller presents is
/// forwarded to the upstream on every call of the chain.
#[derive(Debug, Clone)]
pub struct Bearer(pub AccessToken);

/// Rejection for requests without a usable bearer token.
#[derive(Debug)]
pub struct MissingBearer;

impl IntoResponse for MissingBearer {
    fn into_response(self) -> Response {
        let body: Envelope<()> = Envelope::failure(
            "Unauthorized",
            vec!["missing or invalid bearer token".to_owned()],
        );
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Bearer {
    type Rejection = MissingBearer;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_bearer_token(parts.headers.get(AUTHORIZATION))
            .map(|token| Bearer(AccessToken::new(token.trim())))
            .ok_or(MissingBearer)
    }
}

/// Rejection for a body or query string that does not deserialize.
#[derive(Debug)]
pub struct InvalidRequest(String);

impl IntoResponse for InvalidRequest {
    fn into_response(self) -> Response {
        tracing::info!(error = %self.0, "malformed request rejected");
        let body: Envelope<()> = Envelope::failure("Invalid request", vec![self.0]);
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// `Json` whose rejection is an envelope.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = InvalidRequest;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| ApiJson(value))
            .map_err(|rejection| InvalidRequest(rejection.body_text()))
    }
}

/// `Query` whose rejection is an envelope.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = InvalidRequest;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| ApiQuery(value))
            .map_err(|rejection| InvalidRequest(rejection.body_text()))
    }
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}
