//! Transactions API endpoints

use api_types::transaction::{TransactionKind, TransactionListResponse, TransactionView};
use axum::{Json, extract::State};

use crate::{ServerError, StoredTransaction, server::ServerState};

pub(crate) fn map_kind(direction: engine::Direction) -> TransactionKind {
    match direction {
        engine::Direction::Income => TransactionKind::Income,
        engine::Direction::Expense => TransactionKind::Expense,
    }
}

fn map_stored(stored: StoredTransaction) -> TransactionView {
    TransactionView {
        id: stored.id.0,
        kind: map_kind(stored.record.direction),
        amount: stored.record.amount.to_string(),
        description: stored.record.description,
        category: stored.record.category,
        source: stored.record.source.as_str().to_string(),
        recorded_at: stored.recorded_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let transactions = state
        .ledger
        .snapshot()?
        .into_iter()
        .map(map_stored)
        .collect();

    Ok(Json(TransactionListResponse { transactions }))
}
