//! Statement polling and new-transaction notifications.

use crate::format::format_notification;
use crate::sink::ChatSink;
use chrono::Utc;
use monowatch_core::{statement_window_start, Snapshot};
use monowatch_engine::DeltaEngine;
use monowatch_feeds::{BankFeed, FeedError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Wait between polling cycles.
pub const POLL_INTERVAL: Duration = Duration::from_secs(300);

/// Sent once when monitoring begins.
pub const MONITORING_STARTED: &str = "Monitoring has started.";

/// Configuration for the notifier.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Wait after each cycle before the next one.
    pub poll_interval: Duration,
    /// Upper bound on a single statement fetch.
    pub fetch_timeout: Duration,
    /// Push [`MONITORING_STARTED`] before the first cycle.
    pub announce_start: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            fetch_timeout: Duration::from_secs(30),
            announce_start: true,
        }
    }
}

/// Where the polling loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierState {
    Idle,
    Fetching,
}

/// What one polling cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The fetch failed or timed out; the snapshot was left alone.
    FetchFailed,
    /// Nothing new.
    NoChange,
    /// New entries were announced; `delivered` of `messages` reached the chat.
    Notified {
        entries: usize,
        messages: usize,
        delivered: usize,
    },
}

/// Polls today's statement and pushes new entries to the operator chat.
///
/// Owns the retained snapshot; cycles run strictly one after another.
pub struct Notifier {
    feed: Arc<dyn BankFeed>,
    sink: Arc<dyn ChatSink>,
    account: String,
    config: NotifierConfig,
    engine: DeltaEngine,
    state: NotifierState,
}

impl Notifier {
    /// Create a new notifier.
    pub fn new(
        feed: Arc<dyn BankFeed>,
        sink: Arc<dyn ChatSink>,
        account: impl Into<String>,
        config: NotifierConfig,
    ) -> Self {
        Self {
            feed,
            sink,
            account: account.into(),
            config,
            engine: DeltaEngine::new(),
            state: NotifierState::Idle,
        }
    }

    pub fn state(&self) -> NotifierState {
        self.state
    }

    /// Snapshot retained from the last successful non-empty fetch.
    pub fn snapshot(&self) -> &Snapshot {
        self.engine.snapshot()
    }

    /// Poll forever: one cycle, then the full interval, regardless of outcome.
    pub async fn run(mut self) {
        info!(
            interval_secs = self.config.poll_interval.as_secs(),
            "Starting statement monitor"
        );

        if self.config.announce_start {
            if let Err(e) = self.sink.deliver(MONITORING_STARTED).await {
                error!(error = %e, "Failed to send start notice");
            }
        }

        loop {
            let outcome = self.run_cycle().await;
            debug!(outcome = ?outcome, "Polling cycle finished");
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Run a single fetch / compare / notify cycle.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.state = NotifierState::Fetching;
        let outcome = self.cycle().await;
        self.state = NotifierState::Idle;
        outcome
    }

    async fn cycle(&mut self) -> CycleOutcome {
        let current = match self.fetch().await {
            Ok(current) => current,
            Err(e) => {
                warn!(
                    error = %e,
                    transient = e.is_transient(),
                    "Statement fetch failed, keeping previous snapshot"
                );
                return CycleOutcome::FetchFailed;
            }
        };

        let new_entries = self.engine.observe(current);
        if new_entries.is_empty() {
            return CycleOutcome::NoChange;
        }

        let messages = format_notification(&new_entries);
        let mut delivered = 0;
        for message in &messages {
            match self.sink.deliver(message).await {
                Ok(()) => delivered += 1,
                Err(e) => error!(error = %e, "Failed to send notification"),
            }
        }

        info!(
            entries = new_entries.len(),
            messages = messages.len(),
            delivered,
            "New transactions announced"
        );

        CycleOutcome::Notified {
            entries: new_entries.len(),
            messages: messages.len(),
            delivered,
        }
    }

    async fn fetch(&self) -> Result<Snapshot, FeedError> {
        let since = statement_window_start(Utc::now());
        let timeout = self.config.fetch_timeout;
        match tokio::time::timeout(timeout, self.feed.statement(&self.account, since)).await {
            Ok(result) => result.map(Snapshot::new),
            Err(_) => Err(FeedError::Timeout(format!(
                "statement fetch exceeded {}ms",
                timeout.as_millis()
            ))),
        }
    }
}
