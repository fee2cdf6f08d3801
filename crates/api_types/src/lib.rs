use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod quick_add {
    use super::*;

    /// Request body of the direct (quick-add) channel.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct QuickAdd {
        #[serde(default)]
        pub text: Option<String>,
    }

    /// Echo of what was stored, for display next to the input box.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct QuickAddCreated {
        /// Always `"success"`.
        pub status: String,
        pub id: Uuid,
        pub description: String,
        /// Decimal string with two fractional digits (e.g. `"50.00"`).
        pub amount: String,
        pub kind: transaction::TransactionKind,
        pub category: Option<String>,
    }
}

pub mod webhook {
    use super::*;

    /// Reply to every webhook delivery that was valid JSON.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WebhookStatus {
        pub status: String,
    }

    /// Query string of the subscription handshake.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct VerifyQuery {
        #[serde(rename = "hub.mode")]
        pub mode: Option<String>,
        #[serde(rename = "hub.verify_token")]
        pub verify_token: Option<String>,
        #[serde(rename = "hub.challenge")]
        pub challenge: Option<String>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub kind: TransactionKind,
        pub amount: String,
        pub description: String,
        pub category: Option<String>,
        /// `inbound-channel` or `direct-entry`.
        pub source: String,
        pub recorded_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        /// Newest first.
        pub transactions: Vec<TransactionView>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub name: String,
        pub is_income: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<CategoryView>,
    }
}
