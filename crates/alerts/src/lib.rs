//! Telegram side of the statement monitor.
//!
//! This crate provides:
//! - Periodic statement polling with new-transaction notifications
//! - Operator commands behind a user allow-list
//! - Telegram HTML rendering of entries, balances and rates

pub mod access;
pub mod dispatch;
pub mod format;
pub mod menu;
pub mod notifier;
pub mod sink;
pub mod telegram;

#[cfg(test)]
mod testing;

pub use access::AccessGuard;
pub use dispatch::{CommandDispatcher, Inbound, Reply, Sender};
pub use menu::{Menu, MenuAction, MenuItem};
pub use notifier::{CycleOutcome, Notifier, NotifierConfig, NotifierState};
pub use sink::{ChatSink, DeliveryError};
pub use telegram::{Command, TelegramBot};
