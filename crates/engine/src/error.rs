//! The module contains the errors the engine can throw.
//!
//! Extraction itself never fails: these errors only come from building the
//! engine's configuration or from the persistence collaborator.
//!
//! - [`InvalidAmount`] thrown when an amount string cannot be used.
//! - [`InvalidRules`] thrown when an [`ExtractorRules`] set is unusable.
//! - [`InvalidCatalog`] thrown when a category catalog has duplicate names.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidRules`]: EngineError::InvalidRules
//!  [`InvalidCatalog`]: EngineError::InvalidCatalog
//!  [`ExtractorRules`]: super::rules::ExtractorRules
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid rules: {0}")]
    InvalidRules(String),
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Failure reported by a [`TransactionSink`](crate::TransactionSink).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("rejected: {0}")]
    Rejected(String),
}

impl From<regex::Error> for EngineError {
    fn from(value: regex::Error) -> Self {
        Self::InvalidRules(value.to_string())
    }
}
