use std::sync::Arc;

use vitals::core::{
    register_vitals, MetricKey, MetricReport, MetricSet, MetricsStore, Severity, ThresholdSet,
};
use vitals::ui::{MetricsPanel, Viewport, ViewportSize};

use super::common::ManualSource;

fn wired() -> (ManualSource, Arc<MetricsStore>) {
    let source = ManualSource::default();
    let store = Arc::new(MetricsStore::new());
    register_vitals(&source, &store);
    (source, store)
}

#[test]
fn test_merge_is_order_independent_for_every_key_pair() {
    for k1 in MetricKey::ALL {
        for k2 in MetricKey::ALL {
            if k1 == k2 {
                continue;
            }
            let forward = MetricsStore::new();
            forward.update(k1, 11.0);
            forward.update(k2, 22.0);

            let backward = MetricsStore::new();
            backward.update(k2, 22.0);
            backward.update(k1, 11.0);

            assert_eq!(*forward.snapshot(), *backward.snapshot(), "{} / {}", k1, k2);
        }
    }
}

#[test]
fn test_merge_is_idempotent_for_every_key() {
    for key in MetricKey::ALL {
        let once = MetricsStore::new();
        once.update(key, 0.25);

        let twice = MetricsStore::new();
        twice.update(key, 0.25);
        twice.update(key, 0.25);

        assert_eq!(*once.snapshot(), *twice.snapshot());
    }
}

#[test]
fn test_subscription_cadence() {
    let (source, _store) = wired();
    assert!(source.options(MetricKey::Cls).unwrap().report_all_changes);
    assert!(source.options(MetricKey::Inp).unwrap().report_all_changes);
    assert!(source.options(MetricKey::Lcp).unwrap().report_all_changes);
    assert!(!source.options(MetricKey::Ttfb).unwrap().report_all_changes);
}

#[test]
fn test_scenario_first_lcp_report() {
    let (source, store) = wired();
    let viewport = Viewport::new(ViewportSize::new(120, 40));
    let mut panel = MetricsPanel::mount(&store, ThresholdSet::default(), &viewport);

    assert!(panel
        .rows()
        .iter()
        .all(|row| row.severity == Severity::Unmeasured));

    source.fire(MetricKey::Lcp, 1800.0);
    assert!(panel.refresh());

    let rows = panel.rows();
    assert_eq!(rows[MetricKey::Lcp.index()].severity, Severity::Good);
    for key in [MetricKey::Cls, MetricKey::Inp, MetricKey::Ttfb] {
        assert_eq!(rows[key.index()].severity, Severity::Unmeasured);
    }
    assert_eq!(*store.snapshot(), MetricSet::default().with(MetricKey::Lcp, 1800.0));
}

#[test]
fn test_scenario_layout_shift_updates() {
    let (source, store) = wired();
    let viewport = Viewport::new(ViewportSize::new(120, 40));
    let mut panel = MetricsPanel::mount(&store, ThresholdSet::default(), &viewport);

    for value in [0.02, 0.08, 0.15] {
        source.fire(MetricKey::Cls, value);
    }
    panel.refresh();

    let cls = &panel.rows()[MetricKey::Cls.index()];
    assert_eq!(cls.value, 0.15);
    assert_eq!(cls.display, "0.150");
    assert_eq!(cls.severity, Severity::NeedsImprovement);
    assert!(!panel.refresh());
}

#[test]
fn test_metric_never_returns_to_unmeasured_on_other_updates() {
    let (source, store) = wired();
    source.fire(MetricKey::Ttfb, 350.0);
    source.fire(MetricKey::Inp, 40.0);
    source.fire(MetricKey::Lcp, 2600.0);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.get(MetricKey::Ttfb), 350.0);
    assert_eq!(snapshot.get(MetricKey::Inp), 40.0);
    assert_eq!(snapshot.get(MetricKey::Lcp), 2600.0);
}

#[test]
fn test_unknown_report_does_not_expand_state() {
    let (source, store) = wired();
    source.fire_raw(MetricReport {
        name: "FID".to_string(),
        value: 80.0,
    });
    assert_eq!(*store.snapshot(), MetricSet::default());
}
