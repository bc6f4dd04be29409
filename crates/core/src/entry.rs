//! Statement entries as reported by the bank feed.

use crate::MinorUnits;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shown when an entry carries neither a comment nor a description.
pub const NARRATIVE_PLACEHOLDER: &str = "-//-";

/// One transaction from the account statement.
///
/// Equality is structural over every field the feed supplied, including the
/// ones this crate does not interpret (`id`, `mcc`, `hold`, ...), which are
/// kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEntry {
    /// Transaction instant, Unix seconds on the wire.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    /// Signed amount in account currency.
    pub amount: MinorUnits,
    /// Account balance after this transaction.
    pub balance: MinorUnits,
    /// Payer-supplied comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Bank-supplied description, used when there is no comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Upstream fields not interpreted here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransactionEntry {
    /// Create an entry with no comment, description or upstream extras.
    pub fn new(time: DateTime<Utc>, amount: impl Into<MinorUnits>, balance: impl Into<MinorUnits>) -> Self {
        Self {
            time,
            amount: amount.into(),
            balance: balance.into(),
            comment: None,
            description: None,
            extra: Map::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an opaque upstream field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Upstream transaction id, if the feed supplied one.
    pub fn id(&self) -> Option<&str> {
        self.extra.get("id").and_then(Value::as_str)
    }

    /// Comment if non-empty, else description if non-empty, else the placeholder.
    pub fn narrative(&self) -> &str {
        [self.comment.as_deref(), self.description.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .unwrap_or(NARRATIVE_PLACEHOLDER)
    }
}
