//! Day snapshots of the account statement.

use crate::TransactionEntry;

/// All entries the feed reported for the current day as of one fetch, in feed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot(Vec<TransactionEntry>);

impl Snapshot {
    pub fn new(entries: Vec<TransactionEntry>) -> Self {
        Self(entries)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn entries(&self) -> &[TransactionEntry] {
        &self.0
    }

    /// Structural membership test.
    pub fn contains(&self, entry: &TransactionEntry) -> bool {
        self.0.contains(entry)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionEntry> {
        self.0.iter()
    }
}

impl From<Vec<TransactionEntry>> for Snapshot {
    fn from(entries: Vec<TransactionEntry>) -> Self {
        Self(entries)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a TransactionEntry;
    type IntoIter = std::slice::Iter<'a, TransactionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
