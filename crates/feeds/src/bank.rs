//! Monobank REST client.
//!
//! Personal endpoints are authenticated with the `X-Token` header; the
//! currency table is public.

use crate::{BankFeed, FeedError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use monowatch_core::{CurrencyRate, TransactionEntry};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info};

/// Header carrying the personal API token.
pub const TOKEN_HEADER: &str = "X-Token";

/// Connection settings for the bank API.
#[derive(Clone)]
pub struct BankConfig {
    /// Base URL without trailing slash.
    pub api_base: String,
    /// Personal API token.
    pub token: String,
    /// Per-request timeout (ms).
    pub request_timeout_ms: u64,
}

impl BankConfig {
    pub const DEFAULT_API_BASE: &'static str = "https://api.monobank.ua";

    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_base: Self::DEFAULT_API_BASE.to_string(),
            token: token.into(),
            request_timeout_ms: 10_000,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

impl std::fmt::Debug for BankConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankConfig")
            .field("api_base", &self.api_base)
            .field("token", &"<redacted>")
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

/// `GET` URL of an account statement starting at `since`.
pub fn statement_url(api_base: &str, account: &str, since: DateTime<Utc>) -> String {
    format!(
        "{}/personal/statement/{}/{}/",
        api_base,
        account,
        since.timestamp()
    )
}

/// `GET` URL of the public currency table.
pub fn currency_url(api_base: &str) -> String {
    format!("{}/bank/currency", api_base)
}

/// Decode a statement response body.
pub fn parse_statement(body: &[u8]) -> Result<Vec<TransactionEntry>, FeedError> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode a currency table response body.
pub fn parse_rates(body: &[u8]) -> Result<Vec<CurrencyRate>, FeedError> {
    Ok(serde_json::from_slice(body)?)
}

/// Monobank API client.
pub struct MonobankClient {
    config: BankConfig,
    client: reqwest::Client,
}

impl MonobankClient {
    pub fn new(config: BankConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    async fn get<T>(
        &self,
        url: &str,
        authenticated: bool,
        decode: fn(&[u8]) -> Result<T, FeedError>,
    ) -> Result<T, FeedError> {
        let mut request = self.client.get(url);
        if authenticated {
            request = request.header(TOKEN_HEADER, &self.config.token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FeedError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        decode(&body)
    }
}

#[async_trait]
impl BankFeed for MonobankClient {
    async fn statement(
        &self,
        account: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<TransactionEntry>, FeedError> {
        let url = statement_url(&self.config.api_base, account, since);
        debug!(since = since.timestamp(), "Requesting statement");
        let entries = self.get(&url, true, parse_statement).await?;
        info!(entries = entries.len(), "Successfully obtained the statement");
        Ok(entries)
    }

    async fn rates(&self) -> Result<Vec<CurrencyRate>, FeedError> {
        let url = currency_url(&self.config.api_base);
        let rates = self.get(&url, false, parse_rates).await?;
        info!(pairs = rates.len(), "Successfully obtained the exchange rate");
        Ok(rates)
    }
}
