//! Simulated performance-observation facility.
//!
//! Emulates a page whose first byte arrives after a fixed latency, whose
//! hero image loads late (optionally shifting the content below it) and
//! whose buttons can be slow to respond. Reports are delivered to
//! subscribers according to their `SubscribeOptions`.

mod tasks;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};

use super::metrics::{MetricKey, MetricReport, UNMEASURED};
use super::source::{MetricSource, ReportCallback, SubscribeOptions};
use crate::error::{Result, VitalsError};

/// Settings of the simulated page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Latency until the first response byte.
    pub ttfb_ms: u64,
    /// Delay before the hero image appears.
    pub image_delay_ms: u64,
    /// Reserve the image's space with a skeleton so nothing shifts.
    pub skeleton: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ttfb_ms: 120,
            image_delay_ms: 2000,
            skeleton: false,
        }
    }
}

impl SimulationConfig {
    /// Reject settings the page cannot report. A zero TTFB would read as
    /// the unmeasured sentinel.
    pub fn validate(&self) -> Result<()> {
        if self.ttfb_ms == 0 {
            return Err(VitalsError::config("ttfb_ms must be at least 1"));
        }
        Ok(())
    }
}

type SharedCallback = Arc<dyn Fn(MetricReport) + Send + Sync>;

struct Subscription {
    key: MetricKey,
    options: SubscribeOptions,
    callback: SharedCallback,
}

#[derive(Debug, Clone, Copy, Default)]
struct MetricState {
    value: f64,
    finalized: bool,
}

/// Metric bookkeeping shared between the public handle and the tasks.
///
/// `delivery` is held across every state change and its delivery, and
/// across registration and replay of a new subscriber, so a subscriber
/// never sees values out of order. Callbacks must not subscribe.
#[derive(Default)]
struct FacilityState {
    delivery: Mutex<()>,
    subscriptions: Mutex<Vec<Subscription>>,
    metrics: Mutex<[MetricState; 4]>,
}

impl FacilityState {
    /// Store a recomputed value and deliver it to all-changes subscribers.
    /// Finalized metrics no longer change.
    fn record(&self, key: MetricKey, value: f64) {
        let _delivery = self.delivery.lock();
        {
            let mut metrics = self.metrics.lock();
            let state = &mut metrics[key.index()];
            if state.finalized {
                log::debug!("{} already final, dropping {}", key, value);
                return;
            }
            state.value = value;
        }
        self.deliver(key, value, |options| options.report_all_changes);
    }

    /// Mark a metric final and deliver it to final-only subscribers.
    fn finalize(&self, key: MetricKey) {
        let _delivery = self.delivery.lock();
        let value = {
            let mut metrics = self.metrics.lock();
            let state = &mut metrics[key.index()];
            if state.finalized {
                return;
            }
            state.finalized = true;
            state.value
        };

        if value != UNMEASURED {
            self.deliver(key, value, |options| !options.report_all_changes);
        }
    }

    fn value(&self, key: MetricKey) -> f64 {
        self.metrics.lock()[key.index()].value
    }

    /// Register a subscriber and replay what it would have seen so far.
    fn subscribe(&self, key: MetricKey, callback: SharedCallback, options: SubscribeOptions) {
        let _delivery = self.delivery.lock();
        self.subscriptions.lock().push(Subscription {
            key,
            options,
            callback: Arc::clone(&callback),
        });

        let state = self.metrics.lock()[key.index()];
        let replay = state.value != UNMEASURED && (options.report_all_changes || state.finalized);
        if replay {
            callback(MetricReport::new(key, state.value));
        }
    }

    fn deliver(&self, key: MetricKey, value: f64, wants: impl Fn(SubscribeOptions) -> bool) {
        // Callbacks run outside the subscription lock so they may read values.
        let targets: Vec<SharedCallback> = self
            .subscriptions
            .lock()
            .iter()
            .filter(|sub| sub.key == key && wants(sub.options))
            .map(|sub| Arc::clone(&sub.callback))
            .collect();

        log::trace!("{} = {} -> {} subscriber(s)", key, value, targets.len());
        for callback in targets {
            callback(MetricReport::new(key, value));
        }
    }
}

/// Simulated facility running its page timeline on a private tokio runtime.
pub struct SimulatedSource {
    state: Arc<FacilityState>,
    interaction_tx: mpsc::Sender<Duration>,
    shutdown_tx: broadcast::Sender<()>,
    _runtime: tokio::runtime::Runtime,
}

impl SimulatedSource {
    /// Start the page timeline.
    pub fn start(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Starting simulated page (ttfb {}ms, image delay {}ms, skeleton {})",
            config.ttfb_ms,
            config.image_delay_ms,
            config.skeleton
        );

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .thread_name("vitals-facility")
            .build()
            .map_err(|e| VitalsError::metric_source(format!("Failed to start runtime: {}", e)))?;

        let state = Arc::new(FacilityState::default());
        let (interaction_tx, interaction_rx) = mpsc::channel::<Duration>(32);
        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        runtime.spawn(tasks::page_load_task(
            Arc::clone(&state),
            config,
            shutdown_tx.subscribe(),
        ));
        runtime.spawn(tasks::interaction_task(
            Arc::clone(&state),
            interaction_rx,
            shutdown_tx.subscribe(),
        ));

        Ok(Self {
            state,
            interaction_tx,
            shutdown_tx,
            _runtime: runtime,
        })
    }

    /// Report a user interaction that took `duration` until the next paint.
    pub fn record_interaction(&self, duration: Duration) -> Result<()> {
        self.interaction_tx
            .try_send(duration)
            .map_err(|e| VitalsError::metric_source(format!("Interaction dropped: {}", e)))
    }

    /// Deliver final values to subscribers that did not ask for every
    /// change (the page is going away).
    pub fn finalize(&self) {
        for key in MetricKey::ALL {
            self.state.finalize(key);
        }
    }

    /// Latest value known to the facility, reported or not.
    pub fn current(&self, key: MetricKey) -> f64 {
        self.state.value(key)
    }
}

impl MetricSource for SimulatedSource {
    fn subscribe(&self, key: MetricKey, callback: ReportCallback, options: SubscribeOptions) {
        self.state.subscribe(key, Arc::from(callback), options);
    }
}

impl Drop for SimulatedSource {
    fn drop(&mut self) {
        log::debug!("Shutting down simulated page");
        // No receivers left is fine here.
        let _ = self.shutdown_tx.send(());
    }
}
