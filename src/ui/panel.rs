//! Floating metrics panel: view-state machine and live metric rows.

use std::sync::Arc;

use tokio::sync::watch;

use super::viewport::{ResizeListener, Viewport};
use crate::core::{evaluate, MetricKey, MetricSet, MetricStatus, MetricsStore, ThresholdSet};

/// Approximate height of the expanded panel, in terminal rows.
///
/// Viewports shorter than this anchor the panel to the bottom edge.
pub const APPROX_PANEL_HEIGHT: u16 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Centered,
    Bottom,
}

impl Anchor {
    pub fn for_viewport_height(height: u16) -> Self {
        if height < APPROX_PANEL_HEIGHT {
            Anchor::Bottom
        } else {
            Anchor::Centered
        }
    }
}

/// Local UI state of the panel. Reset to defaults on every mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelViewState {
    pub expanded: bool,
    pub visible: bool,
    pub anchor: Anchor,
}

impl Default for PanelViewState {
    fn default() -> Self {
        Self {
            expanded: true,
            visible: true,
            anchor: Anchor::Centered,
        }
    }
}

impl PanelViewState {
    pub fn collapse(&mut self) {
        if self.visible {
            self.expanded = false;
        }
    }

    pub fn expand(&mut self) {
        if self.visible {
            self.expanded = true;
        }
    }

    pub fn toggle_expand(&mut self) {
        if self.expanded {
            self.collapse();
        } else {
            self.expand();
        }
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Show the panel again. It always comes back expanded.
    pub fn reopen(&mut self) {
        self.visible = true;
        self.expanded = true;
    }

    pub fn toggle_visibility(&mut self) {
        if self.visible {
            self.dismiss();
        } else {
            self.reopen();
        }
    }

    pub fn on_viewport_height(&mut self, height: u16) {
        self.anchor = Anchor::for_viewport_height(height);
    }
}

/// Static description shown in the info popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub reporting: &'static str,
}

pub fn metric_info(key: MetricKey) -> &'static MetricInfo {
    const LCP: MetricInfo = MetricInfo {
        name: "Largest Contentful Paint",
        description: "Measures loading performance. To provide a good user experience, \
            LCP should occur within 2.5 seconds of when the page first starts loading.",
        reporting: "Reported once per page load, but may update several times as larger \
            elements are rendered.",
    };
    const CLS: MetricInfo = MetricInfo {
        name: "Cumulative Layout Shift",
        description: "Measures visual stability. To provide a good user experience, pages \
            should maintain a CLS of 0.1 or less.",
        reporting: "Updated throughout the entire page lifecycle, accumulating all layout \
            shifts. Final value reported when the page is unloaded.",
    };
    const INP: MetricInfo = MetricInfo {
        name: "Interaction to Next Paint",
        description: "Measures responsiveness. A good INP score is 200 milliseconds or less.",
        reporting: "Updated periodically throughout the page session. Considers all user \
            interactions and then reports the worst interaction (98th percentile).",
    };
    const TTFB: MetricInfo = MetricInfo {
        name: "Time to First Byte",
        description: "Measures the time between the request for a resource and when the \
            first byte of a response begins to arrive.",
        reporting: "Reported once, very early in the page load. Measures time from request \
            start to first byte received.",
    };

    match key {
        MetricKey::Lcp => &LCP,
        MetricKey::Cls => &CLS,
        MetricKey::Inp => &INP,
        MetricKey::Ttfb => &TTFB,
    }
}

/// Panel interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    ToggleExpand,
    Dismiss,
    ToggleVisibility,
    SelectNext,
    SelectPrev,
    ToggleInfo,
}

/// Live panel bound to a store and a viewport.
///
/// Holds a store subscription and a resize listener for as long as it is
/// mounted; both are released when the panel is dropped.
pub struct MetricsPanel {
    metrics_rx: watch::Receiver<Arc<MetricSet>>,
    metrics: Arc<MetricSet>,
    thresholds: ThresholdSet,
    view: PanelViewState,
    resize: ResizeListener,
    selected: MetricKey,
    info_open: bool,
}

impl MetricsPanel {
    pub fn mount(store: &MetricsStore, thresholds: ThresholdSet, viewport: &Viewport) -> Self {
        let mut metrics_rx = store.subscribe();
        let metrics = metrics_rx.borrow_and_update().clone();
        let mut resize = viewport.listen();

        let mut view = PanelViewState::default();
        view.on_viewport_height(resize.current().height);

        Self {
            metrics_rx,
            metrics,
            thresholds,
            view,
            resize,
            selected: MetricKey::ALL[0],
            info_open: false,
        }
    }

    /// Pull pending metric and viewport changes. Returns whether a redraw
    /// is needed.
    pub fn refresh(&mut self) -> bool {
        let mut dirty = false;

        if self.metrics_rx.has_changed().unwrap_or(false) {
            self.metrics = self.metrics_rx.borrow_and_update().clone();
            dirty = true;
        }

        if let Some(size) = self.resize.poll() {
            let before = self.view.anchor;
            self.view.on_viewport_height(size.height);
            if self.view.anchor != before {
                log::debug!("Panel anchor {:?} -> {:?}", before, self.view.anchor);
            }
            // The terminal redraws on resize regardless of the anchor.
            dirty = true;
        }

        dirty
    }

    /// Evaluated rows, recomputed from the latest snapshot on every call.
    pub fn rows(&self) -> [MetricStatus; 4] {
        evaluate(&self.metrics, &self.thresholds)
    }

    pub fn handle_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::ToggleExpand => self.view.toggle_expand(),
            PanelEvent::Dismiss => self.view.dismiss(),
            PanelEvent::ToggleVisibility => self.view.toggle_visibility(),
            PanelEvent::SelectNext => self.selected = self.step_selection(1),
            PanelEvent::SelectPrev => self.selected = self.step_selection(MetricKey::ALL.len() - 1),
            PanelEvent::ToggleInfo => {
                if self.view.visible && self.view.expanded {
                    self.info_open = !self.info_open;
                }
            }
        }

        if !(self.view.visible && self.view.expanded) {
            self.info_open = false;
        }
    }

    fn step_selection(&self, offset: usize) -> MetricKey {
        let len = MetricKey::ALL.len();
        MetricKey::ALL[(self.selected.index() + offset) % len]
    }

    pub fn view(&self) -> PanelViewState {
        self.view
    }

    pub fn metrics(&self) -> &MetricSet {
        &self.metrics
    }

    pub fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }

    pub fn selected(&self) -> MetricKey {
        self.selected
    }

    /// Popover content, when open.
    pub fn info(&self) -> Option<&'static MetricInfo> {
        self.info_open.then(|| metric_info(self.selected))
    }
}
