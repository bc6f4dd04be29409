//! Message rendering for Telegram HTML.
//!
//! Bank-supplied text (comments, descriptions) is escaped before it is
//! embedded; everything else is produced here and trusted.

use monowatch_core::{local_clock, Currency, MajorRates, TransactionEntry};
use teloxide::utils::html;

/// Telegram rejects messages longer than this many UTF-16 code units.
pub const MESSAGE_LIMIT: usize = 4096;

/// Reply to a statement request when nothing has been booked today.
pub const NO_PAYMENTS_TODAY: &str = "No payments today yet 😕";

/// Header of the full-day statement reply.
pub const STATEMENT_HEADER: &str = "<b>Statement:</b>";

/// Reply when the balance window holds no entries.
pub const BALANCE_UNAVAILABLE: &str = "Balance is unavailable: no recent transactions.";

/// Reply when a command's bank request failed.
pub const BANK_UNAVAILABLE: &str = "The bank is not responding right now, please try again later.";

const BLOCK_SEPARATOR: &str = "\n\n";

/// Render one transaction as a text block.
pub fn format_entry(entry: &TransactionEntry) -> String {
    format!(
        "{}\n<b>Amount</b>: {}\n<b>Balance</b>: {}\n<b>Comment</b>: {}",
        local_clock(entry.time),
        entry.amount,
        entry.balance,
        html::escape(entry.narrative())
    )
}

/// Messages announcing new transactions, in order.
///
/// Normally a single message; split on entry boundaries when the joined
/// text would exceed [`MESSAGE_LIMIT`].
pub fn format_notification(entries: &[TransactionEntry]) -> Vec<String> {
    pack_blocks(entries.iter().map(format_entry), MESSAGE_LIMIT)
}

/// Full-day statement reply.
pub fn format_statement(entries: &[TransactionEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec![NO_PAYMENTS_TODAY.to_string()];
    }
    let blocks = std::iter::once(STATEMENT_HEADER.to_string()).chain(entries.iter().map(format_entry));
    pack_blocks(blocks, MESSAGE_LIMIT)
}

/// Balance reply from the newest entry of the balance window.
pub fn format_balance(entry: &TransactionEntry) -> String {
    format!("<b>Your balance:</b> {}", entry.balance)
}

/// Buy/sell quotes for USD and EUR.
pub fn format_rates(rates: &MajorRates) -> String {
    let line = |currency: Currency, (buy, sell): (f64, f64)| {
        format!("{}: <b>Buy:</b> {} <b>Sell:</b> {}", currency.label(), buy, sell)
    };
    format!(
        "{}\n{}",
        line(Currency::USD, rates.usd),
        line(Currency::EUR, rates.eur)
    )
}

/// Join blocks with blank lines, starting a new message whenever the next
/// block would push the current one past `limit`. Length is measured in UTF-16
/// code units, as Telegram counts it. A single block longer than `limit` is
/// kept whole.
pub fn pack_blocks(blocks: impl IntoIterator<Item = String>, limit: usize) -> Vec<String> {
    let mut messages = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let separator_len = telegram_len(BLOCK_SEPARATOR);

    for block in blocks {
        let block_len = telegram_len(&block);
        if current_len > 0 && current_len + separator_len + block_len > limit {
            messages.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push_str(BLOCK_SEPARATOR);
            current_len += separator_len;
        }
        current.push_str(&block);
        current_len += block_len;
    }

    if current_len > 0 {
        messages.push(current);
    }
    messages
}

fn telegram_len(text: &str) -> usize {
    text.encode_utf16().count()
}
