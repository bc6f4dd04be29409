//! Inbound command handling.
//!
//! Maps a chat command or button press to a reply. Each query fetches fresh
//! data from the bank; nothing here reads or writes the notifier's snapshot.

use crate::access::AccessGuard;
use crate::format::{
    format_balance, format_rates, format_statement, BALANCE_UNAVAILABLE, BANK_UNAVAILABLE,
};
use crate::menu::{Menu, MenuAction};
use crate::telegram::Command;
use chrono::Utc;
use monowatch_core::{balance_window_start, statement_window_start};
use monowatch_feeds::BankFeed;
use std::sync::Arc;
use teloxide::utils::command::BotCommands;
use teloxide::utils::html;
use tracing::{info, warn};

/// Who sent an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: u64,
    pub first_name: String,
}

/// An inbound chat event.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Command(Command),
    Text(String),
}

/// What to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Greeting plus the reply keyboard.
    Menu { greeting: String },
    /// HTML messages, in order.
    Messages(Vec<String>),
    /// The fixed access-denied text.
    Denied,
}

/// Routes authorized commands to bank queries.
pub struct CommandDispatcher {
    feed: Arc<dyn BankFeed>,
    guard: AccessGuard,
    menu: Menu,
    account: String,
}

impl CommandDispatcher {
    pub fn new(feed: Arc<dyn BankFeed>, guard: AccessGuard, account: impl Into<String>) -> Self {
        Self {
            feed,
            guard,
            menu: Menu::default(),
            account: account.into(),
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Handle one inbound event. `None` means no reply is due.
    pub async fn dispatch(&self, sender: Option<&Sender>, inbound: Inbound) -> Option<Reply> {
        let Some(sender) = sender.filter(|s| self.guard.is_authorized(s.id)) else {
            warn!(user = ?sender.map(|s| s.id), "Command from unauthorized user denied");
            return Some(Reply::Denied);
        };

        match inbound {
            Inbound::Command(Command::Start | Command::Menu) => {
                info!(user = sender.id, "Menu requested");
                Some(Reply::Menu {
                    greeting: format!("Hi, {}!", html::escape(&sender.first_name)),
                })
            }
            Inbound::Command(Command::Help) => Some(Reply::Messages(vec![html::escape(
                &Command::descriptions().to_string(),
            )])),
            Inbound::Text(text) => {
                let action = self.menu.resolve(&text)?;
                info!(user = sender.id, action = ?action, "Menu action requested");
                Some(Reply::Messages(self.perform(action).await))
            }
        }
    }

    /// Run a menu action against the bank and render the reply.
    pub async fn perform(&self, action: MenuAction) -> Vec<String> {
        let now = Utc::now();
        let text = match action {
            MenuAction::CurrencyRates => match self.feed.major_rates().await {
                Ok(rates) => format_rates(&rates),
                Err(e) => {
                    warn!(error = %e, "Failed to fetch exchange rates");
                    BANK_UNAVAILABLE.to_string()
                }
            },
            MenuAction::Balance => {
                match self.feed.balance_entry(&self.account, balance_window_start(now)).await {
                    Ok(Some(entry)) => {
                        info!("Successfully obtained the balance");
                        format_balance(&entry)
                    }
                    Ok(None) => BALANCE_UNAVAILABLE.to_string(),
                    Err(e) => {
                        warn!(error = %e, "Failed to fetch balance");
                        BANK_UNAVAILABLE.to_string()
                    }
                }
            }
            MenuAction::TodayStatement => {
                match self.feed.statement(&self.account, statement_window_start(now)).await {
                    Ok(entries) => return format_statement(&entries),
                    Err(e) => {
                        warn!(error = %e, "Failed to fetch today's statement");
                        BANK_UNAVAILABLE.to_string()
                    }
                }
            }
        };
        vec![text]
    }
}
