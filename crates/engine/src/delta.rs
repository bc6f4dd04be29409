//! Statement delta detection.
//!
//! Compares a freshly fetched day snapshot against the retained one and
//! yields the entries that were not seen before.

use monowatch_core::{Snapshot, TransactionEntry};
use tracing::debug;

/// Result of comparing two snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    /// Entries of the current snapshot absent from the previous one, in feed order.
    pub new_entries: Vec<TransactionEntry>,
    /// Snapshot to keep for the next comparison.
    pub retained: Snapshot,
}

impl Delta {
    fn unchanged(previous: Snapshot) -> Self {
        Self {
            new_entries: Vec::new(),
            retained: previous,
        }
    }

    /// True when nothing needs to be announced.
    pub fn is_empty(&self) -> bool {
        self.new_entries.is_empty()
    }
}

/// Compare `current` against `previous`.
///
/// - An empty `current` never replaces `previous`, so a degraded fetch cannot
///   cause a flood of "new" entries on the next cycle.
/// - An identical `current` keeps `previous` as is.
/// - Otherwise every entry of `current` without a structurally equal twin in
///   `previous` is new, and `current` becomes the retained snapshot. Entries
///   that vanished from the feed are dropped without notice.
pub fn compute_delta(previous: Snapshot, current: Snapshot) -> Delta {
    if current.is_empty() || current == previous {
        return Delta::unchanged(previous);
    }

    let new_entries: Vec<TransactionEntry> = current
        .iter()
        .filter(|entry| !previous.contains(entry))
        .cloned()
        .collect();

    Delta {
        new_entries,
        retained: current,
    }
}

/// Owner of the retained snapshot between polling cycles.
#[derive(Debug, Default)]
pub struct DeltaEngine {
    retained: Snapshot,
}

impl DeltaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known snapshot.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self { retained: snapshot }
    }

    /// Feed a fresh fetch through the engine, returning the entries to announce.
    pub fn observe(&mut self, current: Snapshot) -> Vec<TransactionEntry> {
        let previous = std::mem::take(&mut self.retained);
        let previous_len = previous.len();
        let Delta {
            new_entries,
            retained,
        } = compute_delta(previous, current);
        debug!(
            previous = previous_len,
            retained = retained.len(),
            new = new_entries.len(),
            "Statement delta computed"
        );
        self.retained = retained;
        new_entries
    }

    /// Snapshot retained from the last non-empty fetch.
    pub fn snapshot(&self) -> &Snapshot {
        &self.retained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn entry(secs: i64, amount: i64, balance: i64) -> TransactionEntry {
        TransactionEntry::new(Utc.timestamp_opt(secs, 0).unwrap(), amount, balance)
    }

    fn snapshot(entries: &[TransactionEntry]) -> Snapshot {
        Snapshot::new(entries.to_vec())
    }

    #[test]
    fn test_empty_current_preserves_previous() {
        let previous = snapshot(&[entry(1, 100, 100), entry(2, -20, 80)]);
        let delta = compute_delta(previous.clone(), Snapshot::default());
        assert!(delta.is_empty());
        assert_eq!(delta.retained, previous);
    }

    #[test]
    fn test_identical_is_noop() {
        let s = snapshot(&[entry(1, 100, 100)]);
        let delta = compute_delta(s.clone(), s.clone());
        assert!(delta.is_empty());
        assert_eq!(delta.retained, s);

        let empty = compute_delta(Snapshot::default(), Snapshot::default());
        assert!(empty.is_empty());
        assert!(empty.retained.is_empty());
    }

    #[test]
    fn test_appended_entry_is_new() {
        let a = entry(1, 100, 100);
        let b = entry(2, -30, 70);
        let delta = compute_delta(snapshot(&[a.clone()]), snapshot(&[a.clone(), b.clone()]));
        assert_eq!(delta.new_entries, vec![b.clone()]);
        assert_eq!(delta.retained, snapshot(&[a, b]));
    }

    #[test]
    fn test_first_fetch_announces_everything_in_feed_order() {
        let a = entry(2, -30, 70);
        let b = entry(1, 100, 100);
        let delta = compute_delta(Snapshot::default(), snapshot(&[a.clone(), b.clone()]));
        assert_eq!(delta.new_entries, vec![a, b]);
    }

    #[test]
    fn test_reorder_alone_announces_nothing() {
        let a = entry(1, 100, 100);
        let b = entry(2, -30, 70);
        let delta = compute_delta(snapshot(&[a.clone(), b.clone()]), snapshot(&[b.clone(), a.clone()]));
        assert!(delta.is_empty());
        // The new ordering is retained.
        assert_eq!(delta.retained, snapshot(&[b, a]));
    }

    #[test]
    fn test_corrected_entry_is_renotified() {
        let original = entry(1, 100, 100).with_field("id", "tx-1");
        let corrected = entry(1, 100, 100).with_field("id", "tx-1").with_comment("fixed");
        let delta = compute_delta(snapshot(&[original]), snapshot(&[corrected.clone()]));
        assert_eq!(delta.new_entries, vec![corrected]);
    }

    #[test]
    fn test_shrinking_feed_drops_silently() {
        let a = entry(1, 100, 100);
        let b = entry(2, -30, 70);
        let delta = compute_delta(snapshot(&[a.clone(), b.clone()]), snapshot(&[b.clone()]));
        assert!(delta.is_empty());
        assert_eq!(delta.retained, snapshot(&[b]));
    }

    #[test]
    fn test_append_only_growth_has_no_duplicates() {
        let all: Vec<TransactionEntry> = (0..12).map(|i| entry(i, i * 10 + 1, 1000 + i)).collect();
        let growth = [0usize, 1, 1, 3, 0, 4, 7, 7, 12];

        let mut engine = DeltaEngine::new();
        let mut emitted = Vec::new();
        for &len in &growth {
            emitted.extend(engine.observe(snapshot(&all[..len])));
        }

        assert_eq!(emitted, all);
        assert_eq!(engine.snapshot(), &snapshot(&all));
    }

    #[test]
    fn test_engine_ignores_degraded_fetch() {
        let a = entry(1, 100, 100);
        let b = entry(2, -30, 70);
        let mut engine = DeltaEngine::with_snapshot(snapshot(&[a.clone()]));

        assert!(engine.observe(Snapshot::default()).is_empty());
        assert_eq!(engine.snapshot(), &snapshot(&[a.clone()]));

        assert_eq!(engine.observe(snapshot(&[a.clone(), b.clone()])), vec![b]);
        assert_eq!(engine.snapshot().len(), 2);
    }
}
