//! Transaction primitives.
//!
//! A [`ParsedTransaction`] is what the extractor guesses from a message. A
//! [`NewTransaction`] is that guess tagged with the channel it came from,
//! ready to be handed to a [`TransactionSink`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Amount, StoreError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Expense,
    Income,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "EXPENSE",
            Self::Income => "INCOME",
        }
    }
}

/// Structured guess produced from one free-text message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    pub amount: Amount,
    pub description: String,
    pub direction: Direction,
    /// Catalog spelling of the resolved category, if any.
    pub category_name: Option<String>,
}

/// Channel a transaction entered through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionSource {
    /// Messaging webhook.
    InboundChannel,
    /// Direct API / quick-add form.
    DirectEntry,
}

impl TransactionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InboundChannel => "inbound-channel",
            Self::DirectEntry => "direct-entry",
        }
    }
}

/// Record handed to the persistence collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: Amount,
    pub description: String,
    pub direction: Direction,
    pub category: Option<String>,
    pub source: TransactionSource,
}

impl NewTransaction {
    pub fn from_parsed(parsed: &ParsedTransaction, source: TransactionSource) -> Self {
        Self {
            amount: parsed.amount,
            description: parsed.description.clone(),
            direction: parsed.direction,
            category: parsed.category_name.clone(),
            source,
        }
    }
}

/// Identifier returned by the persistence collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Persistence collaborator the ingestion adapter hands created transactions to.
///
/// Each call is expected to be a single atomic insert.
pub trait TransactionSink {
    fn store(&self, transaction: NewTransaction) -> Result<RecordId, StoreError>;
}

impl<T: TransactionSink + ?Sized> TransactionSink for &T {
    fn store(&self, transaction: NewTransaction) -> Result<RecordId, StoreError> {
        (**self).store(transaction)
    }
}

impl<T: TransactionSink + ?Sized> TransactionSink for std::sync::Arc<T> {
    fn store(&self, transaction: NewTransaction) -> Result<RecordId, StoreError> {
        (**self).store(transaction)
    }
}
