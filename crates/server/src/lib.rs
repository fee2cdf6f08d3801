use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::StoreError;

use serde::Serialize;
pub use ledger::{Ledger, StoredTransaction};
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod categories;
mod ledger;
mod quick_add;
mod server;
mod transactions;
mod webhook;

pub mod types {
    pub mod quick_add {
        pub use api_types::quick_add::{QuickAdd, QuickAddCreated};
    }

    pub mod webhook {
        pub use api_types::webhook::{VerifyQuery, WebhookStatus};
    }

    pub mod transaction {
        pub use api_types::transaction::{
            TransactionKind, TransactionListResponse, TransactionView,
        };
    }

    pub mod category {
        pub use api_types::category::{CategoryListResponse, CategoryView};
    }
}

#[derive(Debug)]
pub enum ServerError {
    /// The ingestion adapter classified the request as failed.
    Ingestion(String),
    Store(StoreError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Ingestion(err) | ServerError::Generic(err) => {
                (StatusCode::BAD_REQUEST, err)
            }
            ServerError::Store(err) => {
                tracing::error!("store error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
