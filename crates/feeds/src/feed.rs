//! Bank feed abstraction.

use crate::FeedError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use monowatch_core::{CurrencyRate, MajorRates, TransactionEntry};

/// Read access to an account's statement and the bank's currency table.
#[async_trait]
pub trait BankFeed: Send + Sync {
    /// Entries for `account` from `since` until now, in feed order.
    async fn statement(
        &self,
        account: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<TransactionEntry>, FeedError>;

    /// Public currency table.
    async fn rates(&self) -> Result<Vec<CurrencyRate>, FeedError>;

    /// First entry of the statement window; carries the latest balance
    /// because the feed lists entries newest first.
    async fn balance_entry(
        &self,
        account: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<TransactionEntry>, FeedError> {
        Ok(self.statement(account, since).await?.into_iter().next())
    }

    /// USD and EUR buy/sell quotes.
    async fn major_rates(&self) -> Result<MajorRates, FeedError> {
        let table = self.rates().await?;
        MajorRates::from_table(&table).ok_or(FeedError::MissingRate)
    }
}
