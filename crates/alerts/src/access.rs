//! Operator allow-list.

use std::collections::HashSet;

/// Fixed reply to anyone outside the allow-list.
pub const ACCESS_DENIED: &str = "You don't have permission to use commands.";

/// Admits only the configured Telegram user ids.
#[derive(Debug, Clone, Default)]
pub struct AccessGuard {
    allowed: HashSet<u64>,
}

impl AccessGuard {
    pub fn new(allowed: impl IntoIterator<Item = u64>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    /// True iff `user_id` is on the allow-list.
    pub fn is_authorized(&self, user_id: u64) -> bool {
        self.allowed.contains(&user_id)
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
