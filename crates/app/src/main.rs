use engine::{Extractor, Ingestor};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "extrato={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let extractor = match Extractor::builder().rules(settings.rules).build() {
        Ok(extractor) => extractor,
        Err(err) => {
            tracing::error!("failed to build extractor from rules: {err}");
            return Err(err.into());
        }
    };
    tracing::info!(
        "Loaded {} keyword rules and {} categories",
        extractor.rules().keywords.len(),
        settings.categories.len()
    );
    if settings.server.verify_token.is_none() {
        tracing::warn!("no webhook verify token configured, subscription handshakes will be refused");
    }

    let mut state = server::ServerState::new(
        Ingestor::new(extractor),
        settings.categories,
        settings.server.verify_token,
    );
    match settings.server.max_transactions {
        Some(limit) => {
            tracing::info!("Ledger keeps at most {limit} transactions");
            state = state.with_ledger(server::Ledger::with_limit(limit));
        }
        None => tracing::debug!("Ledger is unbounded"),
    }

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return Err(err.into());
        }
    };

    server::run_with_listener(state, listener).await?;
    Ok(())
}
