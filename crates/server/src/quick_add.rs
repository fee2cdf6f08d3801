//! Direct (quick-add) channel.

use api_types::quick_add::{QuickAdd, QuickAddCreated};
use axum::{Json, body::Bytes, extract::State};
use engine::{IngestionResult, Outcome};

use crate::{ServerError, server::ServerState, transactions::map_kind};

pub async fn create(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<QuickAddCreated>, ServerError> {
    let request: QuickAdd = serde_json::from_slice(&body)
        .map_err(|err| ServerError::Generic(format!("invalid json: {err}")))?;
    let text = request.text.unwrap_or_default();

    let IngestionResult {
        outcome,
        diagnostic,
        payload,
        record_id,
        store_error,
    } = state
        .ingestor
        .handle_direct(&text, state.catalog.as_ref(), state.ledger.as_ref());

    if let Some(err) = store_error {
        return Err(ServerError::Store(err));
    }

    match (outcome, payload, record_id) {
        (Outcome::Created, Some(parsed), Some(id)) => Ok(Json(QuickAddCreated {
            status: "success".to_string(),
            id: id.0,
            description: parsed.description,
            amount: parsed.amount.to_string(),
            kind: map_kind(parsed.direction),
            category: parsed.category_name,
        })),
        _ => Err(ServerError::Ingestion(diagnostic)),
    }
}
