//! Async tasks driving the simulated page timeline.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::{sleep_until, Instant};

use super::{FacilityState, SimulationConfig};
use crate::core::metrics::MetricKey;

/// Delay between the first byte and the first text paint.
const TEXT_PAINT_OFFSET_MS: u64 = 150;

/// Cumulative layout-shift score after each frame of the image pushing
/// content down.
const LAYOUT_SHIFT_STEPS: [f64; 3] = [0.02, 0.08, 0.15];

/// Duration of one rendered frame.
const FRAME: Duration = Duration::from_millis(16);

/// Task that plays back the page load: first byte, text paint, delayed
/// image and the layout shift it causes.
pub(super) async fn page_load_task(
    state: Arc<FacilityState>,
    config: SimulationConfig,
    mut shutdown: broadcast::Receiver<()>,
) {
    let started = Instant::now();

    tokio::select! {
        _ = play_page_load(&state, config, started) => {
            log::debug!("Page load timeline complete");
        }
        _ = shutdown.recv() => {
            log::debug!("Page load task shutting down");
        }
    }
}

async fn play_page_load(state: &FacilityState, config: SimulationConfig, started: Instant) {
    let at = |ms: u64| started + Duration::from_millis(ms);

    sleep_until(at(config.ttfb_ms)).await;
    state.record(MetricKey::Ttfb, config.ttfb_ms as f64);
    state.finalize(MetricKey::Ttfb);

    // The image cannot arrive before the document does.
    let text_paint_ms = config.ttfb_ms + TEXT_PAINT_OFFSET_MS;
    let image_ms = config.image_delay_ms.max(config.ttfb_ms);

    if text_paint_ms < image_ms {
        sleep_until(at(text_paint_ms)).await;
        state.record(MetricKey::Lcp, text_paint_ms as f64);
    }

    sleep_until(at(image_ms)).await;
    state.record(MetricKey::Lcp, image_ms as f64);

    if config.skeleton {
        return;
    }

    for score in LAYOUT_SHIFT_STEPS {
        tokio::time::sleep(FRAME).await;
        state.record(MetricKey::Cls, score);
    }
}

/// Task that turns interaction durations into INP updates.
///
/// The first interaction also ends LCP observation.
pub(super) async fn interaction_task(
    state: Arc<FacilityState>,
    mut interaction_rx: mpsc::Receiver<Duration>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            Some(duration) = interaction_rx.recv() => {
                state.finalize(MetricKey::Lcp);

                let latency = duration.as_millis() as f64;
                if latency > state.value(MetricKey::Inp) {
                    state.record(MetricKey::Inp, latency);
                }
            }
            _ = shutdown.recv() => {
                log::debug!("Interaction task shutting down");
                break;
            }
        }
    }
}
