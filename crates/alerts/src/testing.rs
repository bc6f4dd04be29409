//! In-memory collaborators for unit tests.

use crate::sink::{ChatSink, DeliveryError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use monowatch_core::{CurrencyRate, TransactionEntry};
use monowatch_feeds::{BankFeed, FeedError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type StatementResult = Result<Vec<TransactionEntry>, FeedError>;
type RatesResult = Result<Vec<CurrencyRate>, FeedError>;

/// Bank feed replaying scripted responses; an exhausted script yields an empty statement.
#[derive(Default)]
pub struct ScriptedFeed {
    statements: Mutex<VecDeque<StatementResult>>,
    rates: Mutex<VecDeque<RatesResult>>,
    delay: Option<Duration>,
    statement_calls: AtomicUsize,
    rate_calls: AtomicUsize,
    last_since: Mutex<Option<DateTime<Utc>>>,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statement(self, result: StatementResult) -> Self {
        self.statements.lock().unwrap().push_back(result);
        self
    }

    pub fn with_rates(self, result: RatesResult) -> Self {
        self.rates.lock().unwrap().push_back(result);
        self
    }

    /// Stall every statement request for `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn statement_calls(&self) -> usize {
        self.statement_calls.load(Ordering::SeqCst)
    }

    pub fn rate_calls(&self) -> usize {
        self.rate_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.statement_calls() + self.rate_calls()
    }

    pub fn last_since(&self) -> Option<DateTime<Utc>> {
        *self.last_since.lock().unwrap()
    }
}

#[async_trait]
impl BankFeed for ScriptedFeed {
    async fn statement(&self, _account: &str, since: DateTime<Utc>) -> StatementResult {
        self.statement_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_since.lock().unwrap() = Some(since);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.statements.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn rates(&self) -> RatesResult {
        self.rate_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.rates.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Chat sink that records what it was asked to send.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<String>>,
    attempts: AtomicUsize,
    failing: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatSink for RecordingSink {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError::Rejected("chat not found".to_string()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
