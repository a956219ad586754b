use axum::{extract::State, http::StatusCode, response::Response, Extension};
use pricedesk_core::{ClassifyFailure, Credentials, Envelope, FailureKind};
use pricedesk_upstream::UserSummary;
use serde::{Deserialize, Serialize};

use crate::middleware::{ApiJson, Bearer, RequestId};

use super::{respond, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LoginBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    expires_in_mins: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LoginData {
    access_token: String,
}

/// `POST /api/auth/login`
pub(super) async fn login(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ApiJson(body): ApiJson<LoginBody>,
) -> Response {
    let credentials = match Credentials::new(body.username, body.password) {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::info!(request_id = %req_id.0, "login rejected: missing credentials");
            return respond(
                StatusCode::BAD_REQUEST,
                Envelope::<LoginData>::failure("Login failed", vec![e.to_string()]),
            );
        }
    };

    let expires_in_mins = body
        .expires_in_mins
        .unwrap_or(state.config.token_expires_mins);
    let envelope = pricedesk_core::login(state.client.as_ref(), &credentials, expires_in_mins)
        .await
        .map(|token| LoginData {
            access_token: token.as_str().to_owned(),
        });

    let status = if envelope.success {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    respond(status, envelope)
}

/// `GET /api/auth/users`
///
/// An upstream answer without a `users` collection yields an empty list. A
/// refused token is 401; any other upstream failure is 502.
pub(super) async fn list_users(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Bearer(token): Bearer,
) -> Response {
    match state.client.list_users(&token).await {
        Ok(users) => {
            let users: Vec<UserSummary> = users.unwrap_or_default();
            let message = format!("Found {} users", users.len());
            respond(StatusCode::OK, Envelope::ok(users, message))
        }
        Err(e) => {
            tracing::warn!(
                request_id = %req_id.0,
                kind = %e.kind(),
                error = %e,
                "user listing failed"
            );
            let status = if e.kind() == FailureKind::Auth {
                StatusCode::UNAUTHORIZED
            } else {
                StatusCode::BAD_GATEWAY
            };
            respond(
                status,
                Envelope::<Vec<UserSummary>>::failure("Could not load users", vec![e.to_string()]),
            )
        }
    }
}
