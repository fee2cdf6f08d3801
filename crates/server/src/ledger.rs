//! In-process ledger the ingestion adapter hands created transactions to.
//!
//! Storage beyond the process lifetime is out of scope for this service; the
//! ledger only keeps what was accepted so it can be listed back.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use engine::{NewTransaction, RecordId, StoreError, TransactionSink};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredTransaction {
    pub id: RecordId,
    pub record: NewTransaction,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only list of accepted transactions.
///
/// Records are never evicted. An unbounded ledger grows for as long as the
/// process runs; [`Ledger::with_limit`] makes `store` reject new records once
/// the limit is reached.
#[derive(Debug, Default)]
pub struct Ledger {
    records: Mutex<Vec<StoredTransaction>>,
    limit: Option<usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger that holds at most `limit` transactions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: Mutex::default(),
            limit: Some(limit),
        }
    }

    /// All stored transactions, newest first.
    pub fn snapshot(&self) -> Result<Vec<StoredTransaction>, StoreError> {
        let records = self.lock()?;
        Ok(records.iter().rev().cloned().collect())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<StoredTransaction>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("ledger lock poisoned".to_string()))
    }
}

impl TransactionSink for Ledger {
    fn store(&self, transaction: NewTransaction) -> Result<RecordId, StoreError> {
        let mut records = self.lock()?;
        if let Some(limit) = self.limit
            && records.len() >= limit
        {
            return Err(StoreError::Rejected(format!(
                "ledger is full ({limit} transactions)"
            )));
        }

        let id = RecordId::new_v4();
        records.push(StoredTransaction {
            id,
            record: transaction,
            recorded_at: Utc::now(),
        });
        Ok(id)
    }
}
