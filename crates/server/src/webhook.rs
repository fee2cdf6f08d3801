//! Messaging webhook endpoints.
//!
//! The platform retries deliveries that do not get a 2xx, so every body that
//! parses as JSON is answered with `200` and the adapter's diagnostic, even
//! when nothing was created.

use api_types::webhook::{VerifyQuery, WebhookStatus};
use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{ServerError, server::ServerState};

/// Subscription handshake.
pub async fn verify(
    State(state): State<ServerState>,
    Query(query): Query<VerifyQuery>,
) -> Response {
    let mode = query.mode.filter(|m| !m.is_empty());
    let token = query.verify_token.filter(|t| !t.is_empty());

    let (Some(mode), Some(token)) = (mode, token) else {
        return (StatusCode::OK, "Hello").into_response();
    };

    let expected = state.verify_token.as_deref();
    if mode == "subscribe" && expected == Some(token.as_str()) {
        tracing::info!("webhook subscription verified");
        (StatusCode::OK, query.challenge.unwrap_or_default()).into_response()
    } else {
        tracing::warn!("webhook verification refused (mode {mode:?})");
        (StatusCode::FORBIDDEN, "Forbidden").into_response()
    }
}

pub async fn receive(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<WebhookStatus>, ServerError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|err| ServerError::Generic(format!("invalid json: {err}")))?;

    let result = state
        .ingestor
        .handle_webhook(&payload, state.catalog.as_ref(), state.ledger.as_ref());
    tracing::debug!("webhook delivery: {:?} ({})", result.outcome, result.diagnostic);

    Ok(Json(WebhookStatus {
        status: result.diagnostic,
    }))
}
