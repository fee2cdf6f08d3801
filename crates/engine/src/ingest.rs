//! Ingestion adapter: channel payload -> extractor -> persistence hand-off.
//!
//! Every call is independent. Nothing here panics or returns `Err` on bad
//! input: each payload is classified into an [`IngestionResult`] the channel
//! can report back.
//!
//! Two channels feed the adapter:
//!
//! - the messaging webhook ([`Ingestor::handle_webhook`]), where non-text
//!   events are expected and are quietly [`Outcome::Ignored`];
//! - direct entry ([`Ingestor::handle_direct`]), where missing text is a
//!   caller error and is [`Outcome::Failed`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    CategoryLookup, Extractor, NewTransaction, ParsedTransaction, RecordId, StoreError,
    TransactionSink, TransactionSource,
};

mod envelope;

use envelope::Envelope;

/// Diagnostic strings reported with each [`Outcome`].
pub mod diagnostics {
    pub const CREATED: &str = "transaction created";
    pub const NO_MESSAGES: &str = "no messages found";
    pub const NOT_TEXT: &str = "not a text message";
    pub const EMPTY_TEXT: &str = "empty text";
    pub const NO_TEXT_PROVIDED: &str = "no text provided";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Created,
    Ignored,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionResult {
    pub outcome: Outcome,
    pub diagnostic: String,
    /// Present only when `outcome` is [`Outcome::Created`].
    pub payload: Option<ParsedTransaction>,
    /// Identifier the sink assigned to the stored record.
    pub record_id: Option<RecordId>,
    /// Sink error behind a [`Outcome::Failed`], so callers can tell a storage
    /// fault from bad input.
    #[serde(skip)]
    pub store_error: Option<StoreError>,
}

impl IngestionResult {
    fn created(payload: ParsedTransaction, record_id: RecordId) -> Self {
        Self {
            outcome: Outcome::Created,
            diagnostic: diagnostics::CREATED.to_string(),
            payload: Some(payload),
            record_id: Some(record_id),
            store_error: None,
        }
    }

    fn ignored(diagnostic: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Ignored,
            diagnostic: diagnostic.into(),
            payload: None,
            record_id: None,
            store_error: None,
        }
    }

    fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failed,
            diagnostic: diagnostic.into(),
            payload: None,
            record_id: None,
            store_error: None,
        }
    }

    fn malformed(err: &str) -> Self {
        tracing::warn!("malformed webhook payload: {err}");
        Self::failed(format!("malformed payload: {err}"))
    }

    fn storage_failed(err: StoreError) -> Self {
        Self {
            store_error: Some(err.clone()),
            ..Self::failed(format!("storage error: {err}"))
        }
    }

    pub fn is_created(&self) -> bool {
        self.outcome == Outcome::Created
    }
}

/// Bridges channel payloads to the [`Extractor`].
#[derive(Debug, Clone)]
pub struct Ingestor {
    extractor: Extractor,
}

impl Ingestor {
    pub fn new(extractor: Extractor) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Handles one messaging webhook body.
    pub fn handle_webhook<L, S>(&self, payload: &Value, catalog: &L, sink: &S) -> IngestionResult
    where
        L: CategoryLookup + ?Sized,
        S: TransactionSink + ?Sized,
    {
        let message = match Envelope::from_value(payload).and_then(Envelope::into_first_message) {
            Ok(Some(message)) => message,
            Ok(None) => {
                tracing::debug!("webhook without messages");
                return IngestionResult::ignored(diagnostics::NO_MESSAGES);
            }
            Err(err) => return IngestionResult::malformed(&err),
        };
        if !message.is_text() {
            tracing::debug!("webhook message of type {:?} ignored", message.kind);
            return IngestionResult::ignored(diagnostics::NOT_TEXT);
        }
        let text = match message.into_body() {
            Ok(body) => body.unwrap_or_default(),
            Err(err) => return IngestionResult::malformed(&err),
        };
        if text.trim().is_empty() {
            return IngestionResult::ignored(diagnostics::EMPTY_TEXT);
        }

        self.accept(&text, catalog, sink, TransactionSource::InboundChannel)
    }

    /// Handles text submitted directly (quick-add form, API).
    pub fn handle_direct<L, S>(&self, text: &str, catalog: &L, sink: &S) -> IngestionResult
    where
        L: CategoryLookup + ?Sized,
        S: TransactionSink + ?Sized,
    {
        if text.trim().is_empty() {
            return IngestionResult::failed(diagnostics::NO_TEXT_PROVIDED);
        }
        self.accept(text, catalog, sink, TransactionSource::DirectEntry)
    }

    fn accept<L, S>(
        &self,
        text: &str,
        catalog: &L,
        sink: &S,
        source: TransactionSource,
    ) -> IngestionResult
    where
        L: CategoryLookup + ?Sized,
        S: TransactionSink + ?Sized,
    {
        let parsed = self.extractor.extract(text, catalog);
        match sink.store(NewTransaction::from_parsed(&parsed, source)) {
            Ok(record_id) => {
                tracing::info!(
                    "{} transaction {record_id} created: {} {} ({})",
                    source.as_str(),
                    parsed.direction.as_str(),
                    parsed.amount,
                    parsed.description
                );
                IngestionResult::created(parsed, record_id)
            }
            Err(err) => {
                tracing::error!("failed to store {} transaction: {err}", source.as_str());
                IngestionResult::storage_failed(err)
            }
        }
    }
}
