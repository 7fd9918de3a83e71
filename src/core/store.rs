//! Process-wide reactive metric state.
//!
//! The store owns the current `MetricSet` behind a tokio watch channel. Each
//! update publishes a fresh `Arc<MetricSet>` built from the previous one plus
//! a single changed entry, so snapshots handed out earlier never change under
//! their holders. Subscribers are plain watch receivers.

use std::sync::Arc;

use tokio::sync::watch;

use super::metrics::{MetricKey, MetricReport, MetricSet};
use crate::error::{Result, VitalsError};

#[derive(Debug)]
pub struct MetricsStore {
    snapshot_tx: watch::Sender<Arc<MetricSet>>,
}

impl MetricsStore {
    /// Create a store with every metric unmeasured.
    pub fn new() -> Self {
        Self::with_initial(MetricSet::default())
    }

    pub fn with_initial(initial: MetricSet) -> Self {
        // The initial receiver is dropped; senders keep working without receivers.
        let (snapshot_tx, _) = watch::channel(Arc::new(initial));
        Self { snapshot_tx }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<MetricSet> {
        self.snapshot_tx.borrow().clone()
    }

    /// Replace the value of one metric and notify subscribers.
    ///
    /// Returns `false` when the value was already stored; nothing is
    /// published in that case.
    pub fn update(&self, key: MetricKey, value: f64) -> bool {
        let changed = self.snapshot_tx.send_if_modified(|current| {
            if current.get(key) == value {
                return false;
            }
            *current = Arc::new(current.with(key, value));
            true
        });

        if changed {
            log::trace!("{} updated to {}", key, value);
        }
        changed
    }

    /// Merge a facility report. Unknown names and non-finite values are
    /// rejected and leave the state untouched.
    pub fn apply(&self, report: &MetricReport) -> Result<bool> {
        let key: MetricKey = report.name.parse()?;
        if !report.value.is_finite() {
            return Err(VitalsError::invalid_value(key.short_name(), report.value));
        }
        Ok(self.update(key, report.value))
    }

    /// Register a listener. Dropping the receiver unregisters it.
    pub fn subscribe(&self) -> watch::Receiver<Arc<MetricSet>> {
        self.snapshot_tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.snapshot_tx.receiver_count()
    }
}

impl Default for MetricsStore {
    fn default() -> Self {
        Self::new()
    }
}
