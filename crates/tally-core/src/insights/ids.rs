//! Id and timestamp providers for engine outputs
//!
//! Agents never read the clock or generate ids themselves; they ask the
//! provider carried by the [`AnalysisContext`](super::AnalysisContext). Tests
//! inject [`SequentialIds`] to get predictable values.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of output ids and timestamps
pub trait IdProvider: Send + Sync {
    /// A fresh id starting with `prefix` (e.g. "insight", "alert")
    fn next_id(&self, prefix: &str) -> String;

    /// Timestamp to stamp on outputs
    fn now(&self) -> DateTime<Utc>;
}

/// Random ids and wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIds;

impl IdProvider for SystemIds {
    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4().simple())
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Counter-based ids (`insight-1`, `alert-2`, ...) and a frozen timestamp
#[derive(Debug)]
pub struct SequentialIds {
    counter: AtomicU64,
    timestamp: DateTime<Utc>,
}

impl SequentialIds {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            counter: AtomicU64::new(0),
            timestamp,
        }
    }
}

impl Default for SequentialIds {
    /// Frozen at the Unix epoch
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl IdProvider for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{}", prefix, n)
    }

    fn now(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::default();
        assert_eq!(ids.next_id("insight"), "insight-1");
        assert_eq!(ids.next_id("alert"), "alert-2");
        assert_eq!(ids.now(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_system_ids_are_unique() {
        let ids = SystemIds;
        let a = ids.next_id("insight");
        let b = ids.next_id("insight");
        assert!(a.starts_with("insight-"));
        assert_ne!(a, b);
    }
}
