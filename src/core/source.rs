//! Contract with the performance-observation facility.
//!
//! A facility calls back once per newly computed or recomputed metric value.
//! `register_vitals` wires one subscription per tracked metric into a store.

use std::sync::Arc;

use super::metrics::{MetricKey, MetricReport};
use super::store::MetricsStore;

/// Callback invoked by a facility for every delivered report.
pub type ReportCallback = Box<dyn Fn(MetricReport) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubscribeOptions {
    /// Deliver every intermediate value instead of only the final one.
    pub report_all_changes: bool,
}

impl SubscribeOptions {
    pub const ALL_CHANGES: SubscribeOptions = SubscribeOptions {
        report_all_changes: true,
    };
    pub const FINAL_ONLY: SubscribeOptions = SubscribeOptions {
        report_all_changes: false,
    };
}

/// A source of metric reports.
pub trait MetricSource {
    fn subscribe(&self, key: MetricKey, callback: ReportCallback, options: SubscribeOptions);
}

/// Subscription options used for each tracked metric.
///
/// TTFB is known early and never changes; the others are recomputed over
/// the session.
pub fn options_for(key: MetricKey) -> SubscribeOptions {
    match key {
        MetricKey::Ttfb => SubscribeOptions::FINAL_ONLY,
        MetricKey::Lcp | MetricKey::Cls | MetricKey::Inp => SubscribeOptions::ALL_CHANGES,
    }
}

/// Subscribe the store to all four metrics of `source`.
pub fn register_vitals<S: MetricSource + ?Sized>(source: &S, store: &Arc<MetricsStore>) {
    for key in MetricKey::ALL {
        let store = Arc::clone(store);
        let callback: ReportCallback = Box::new(move |report: MetricReport| {
            if let Err(e) = store.apply(&report) {
                log::warn!("Ignoring report {:?}: {}", report, e);
            }
        });
        source.subscribe(key, callback, options_for(key));
        log::debug!("Subscribed to {} ({:?})", key, options_for(key));
    }
}
