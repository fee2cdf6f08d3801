use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{Ledger, categories, quick_add, transactions, webhook};
use engine::{CategoryCatalog, Ingestor};

#[derive(Clone)]
pub struct ServerState {
    pub ingestor: Arc<Ingestor>,
    pub catalog: Arc<CategoryCatalog>,
    pub ledger: Arc<Ledger>,
    /// Token the messaging platform must echo during the subscription
    /// handshake. `None` refuses every handshake.
    pub verify_token: Option<Arc<str>>,
}

impl ServerState {
    pub fn new(ingestor: Ingestor, catalog: CategoryCatalog, verify_token: Option<String>) -> Self {
        Self {
            ingestor: Arc::new(ingestor),
            catalog: Arc::new(catalog),
            ledger: Arc::new(Ledger::new()),
            verify_token: verify_token.map(Arc::from),
        }
    }

    /// Replaces the default unbounded ledger.
    pub fn with_ledger(mut self, ledger: Ledger) -> Self {
        self.ledger = Arc::new(ledger);
        self
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/webhook/whatsapp",
            get(webhook::verify).post(webhook::receive),
        )
        .route("/api/nlp", post(quick_add::create))
        .route("/transactions", get(transactions::list))
        .route("/categories", get(categories::list))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
