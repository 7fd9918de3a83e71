use std::sync::Arc;
use std::time::{Duration, Instant};

use vitals::core::{
    register_vitals, MetricKey, MetricSet, MetricsStore, SimulatedSource, SimulationConfig,
};

const DEADLINE: Duration = Duration::from_secs(5);

fn fast_page(skeleton: bool) -> SimulationConfig {
    SimulationConfig {
        ttfb_ms: 10,
        image_delay_ms: 200,
        skeleton,
    }
}

/// Poll the store until `done` holds or the deadline passes.
fn wait_for(store: &MetricsStore, done: impl Fn(&MetricSet) -> bool) -> MetricSet {
    let started = Instant::now();
    loop {
        let snapshot = *store.snapshot();
        if done(&snapshot) || started.elapsed() > DEADLINE {
            return snapshot;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn test_page_load_reports_lcp_and_layout_shift() {
    let store = Arc::new(MetricsStore::new());
    let source = SimulatedSource::start(fast_page(false)).unwrap();
    register_vitals(&source, &store);

    let snapshot = wait_for(&store, |m| {
        m.get(MetricKey::Lcp) == 200.0 && m.get(MetricKey::Cls) == 0.15
    });
    assert_eq!(snapshot.get(MetricKey::Lcp), 200.0);
    assert_eq!(snapshot.get(MetricKey::Cls), 0.15);
    assert_eq!(snapshot.get(MetricKey::Inp), 0.0);
}

#[test]
fn test_skeleton_prevents_layout_shift() {
    let store = Arc::new(MetricsStore::new());
    let source = SimulatedSource::start(fast_page(true)).unwrap();
    register_vitals(&source, &store);

    wait_for(&store, |m| m.get(MetricKey::Lcp) == 200.0);
    std::thread::sleep(Duration::from_millis(150));

    let snapshot = store.snapshot();
    assert_eq!(snapshot.get(MetricKey::Lcp), 200.0);
    assert_eq!(snapshot.get(MetricKey::Cls), 0.0);
}

#[test]
fn test_ttfb_is_reported_once_final() {
    let store = Arc::new(MetricsStore::new());
    let source = SimulatedSource::start(fast_page(false)).unwrap();
    register_vitals(&source, &store);

    let snapshot = wait_for(&store, |m| m.get(MetricKey::Ttfb) == 10.0);
    assert_eq!(snapshot.get(MetricKey::Ttfb), 10.0);
    assert_eq!(source.current(MetricKey::Ttfb), 10.0);
}

#[test]
fn test_slow_interaction_sets_inp_to_worst_latency() {
    let store = Arc::new(MetricsStore::new());
    let source = SimulatedSource::start(fast_page(true)).unwrap();
    register_vitals(&source, &store);

    source.record_interaction(Duration::from_millis(300)).unwrap();
    wait_for(&store, |m| m.get(MetricKey::Inp) == 300.0);

    source.record_interaction(Duration::from_millis(50)).unwrap();
    source.record_interaction(Duration::from_millis(600)).unwrap();
    let snapshot = wait_for(&store, |m| m.get(MetricKey::Inp) == 600.0);
    assert_eq!(snapshot.get(MetricKey::Inp), 600.0);
}

#[test]
fn test_late_subscriber_receives_current_values() {
    let source = SimulatedSource::start(fast_page(false)).unwrap();

    let started = Instant::now();
    while source.current(MetricKey::Cls) != 0.15 && started.elapsed() < DEADLINE {
        std::thread::sleep(Duration::from_millis(10));
    }

    let store = Arc::new(MetricsStore::new());
    register_vitals(&source, &store);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.get(MetricKey::Cls), 0.15);
    assert_eq!(snapshot.get(MetricKey::Ttfb), 10.0);
}
