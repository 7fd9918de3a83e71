use vitals::core::{MetricKey, MetricsStore, ThresholdSet};
use vitals::ui::panel::APPROX_PANEL_HEIGHT;
use vitals::ui::{Anchor, MetricsPanel, PanelEvent, Viewport, ViewportSize};

fn mount(height: u16) -> (MetricsStore, Viewport, MetricsPanel) {
    let store = MetricsStore::new();
    let viewport = Viewport::new(ViewportSize::new(120, height));
    let panel = MetricsPanel::mount(&store, ThresholdSet::default(), &viewport);
    (store, viewport, panel)
}

#[test]
fn test_collapse_expand_cycle() {
    let (_store, _viewport, mut panel) = mount(40);
    panel.handle_event(PanelEvent::ToggleExpand);
    assert!(panel.view().visible);
    assert!(!panel.view().expanded);

    panel.handle_event(PanelEvent::ToggleExpand);
    assert!(panel.view().expanded);
}

#[test]
fn test_dismiss_then_reopen_resets_expanded() {
    for collapsed_first in [false, true] {
        let (_store, _viewport, mut panel) = mount(40);
        if collapsed_first {
            panel.handle_event(PanelEvent::ToggleExpand);
        }

        panel.handle_event(PanelEvent::Dismiss);
        assert!(!panel.view().visible);

        panel.handle_event(PanelEvent::ToggleVisibility);
        assert!(panel.view().visible);
        assert!(panel.view().expanded);
    }
}

#[test]
fn test_shrinking_viewport_anchors_to_bottom() {
    let (store, viewport, mut panel) = mount(40);
    store.update(MetricKey::Ttfb, 300.0);
    panel.refresh();
    let before = *panel.metrics();
    assert_eq!(panel.view().anchor, Anchor::Centered);

    viewport.resize(120, APPROX_PANEL_HEIGHT - 4);
    assert!(panel.refresh());

    assert_eq!(panel.view().anchor, Anchor::Bottom);
    assert!(panel.view().visible);
    assert_eq!(*panel.metrics(), before);

    viewport.resize(120, APPROX_PANEL_HEIGHT);
    panel.refresh();
    assert_eq!(panel.view().anchor, Anchor::Centered);
}

#[test]
fn test_remount_starts_from_defaults() {
    let store = MetricsStore::new();
    let viewport = Viewport::new(ViewportSize::new(120, 40));

    let mut panel = MetricsPanel::mount(&store, ThresholdSet::default(), &viewport);
    panel.handle_event(PanelEvent::Dismiss);
    drop(panel);
    assert_eq!(viewport.listener_count(), 0);

    let panel = MetricsPanel::mount(&store, ThresholdSet::default(), &viewport);
    assert!(panel.view().visible);
    assert!(panel.view().expanded);
    assert_eq!(viewport.listener_count(), 1);
}

#[test]
fn test_thresholds_drive_classification() {
    let store = MetricsStore::new();
    let viewport = Viewport::new(ViewportSize::new(120, 40));
    let strict = ThresholdSet {
        inp: 50.0,
        ..Default::default()
    };
    let mut panel = MetricsPanel::mount(&store, strict, &viewport);

    store.update(MetricKey::Inp, 60.0);
    panel.refresh();
    assert_eq!(
        panel.rows()[MetricKey::Inp.index()].severity,
        vitals::core::Severity::NeedsImprovement
    );
}
