//! Message-to-transaction extraction engine.
//!
//! - [`Extractor`] turns free text such as `"gastei 50 no mercado"` into a
//!   [`ParsedTransaction`] (amount, direction, description, category).
//! - [`Ingestor`] unwraps channel payloads (messaging webhook or direct
//!   entry), runs the extractor and hands the result to a [`TransactionSink`].
//!
//! The engine performs no I/O and holds no state between calls.
//!
//! ```rust
//! use engine::{CategoryCatalog, Direction, Extractor};
//!
//! let extractor = Extractor::builder().build().unwrap();
//! let parsed = extractor.extract("recebi 1500 de salário", &CategoryCatalog::default_seed());
//! assert_eq!(parsed.amount.to_string(), "1500.00");
//! assert_eq!(parsed.direction, Direction::Income);
//! assert_eq!(parsed.description, "Salário");
//! assert_eq!(parsed.category_name.as_deref(), Some("Salário"));
//! ```

pub use categories::{Category, CategoryCatalog, CategoryLookup};
pub use error::{EngineError, StoreError};
pub use extractor::{AMOUNT_PATTERN, Extractor, ExtractorBuilder};
pub use ingest::{IngestionResult, Ingestor, Outcome, diagnostics};
pub use money::{AMOUNT_SCALE, Amount};
pub use rules::{ExtractorRules, KeywordRule};
pub use transactions::{
    Direction, NewTransaction, ParsedTransaction, RecordId, TransactionSink, TransactionSource,
};

mod categories;
mod error;
mod extractor;
mod ingest;
mod money;
mod rules;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
