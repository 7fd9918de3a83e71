//! Watch command handler.
//!
//! Runs the simulated demo page and shows its metrics live, either in the
//! TUI or as JSON lines.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ArgMatches;
use serde::Serialize;

use crate::core::query::QueryOverrides;
use crate::core::{
    evaluate, register_vitals, MetricSet, MetricStatus, MetricsStore, SimulatedSource,
    SimulationConfig, ThresholdSet,
};
use crate::ui::vitals_tui::{run_vitals_app, VitalsAppConfig};

/// Gap between scripted clicks in JSON mode.
const CLICK_SPACING: Duration = Duration::from_secs(1);

/// Execute the watch command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;
    let simulation = simulation_from_args(matches, config.demo);
    let thresholds = config.thresholds;

    if matches.get_flag("json") {
        let secs = matches.get_one::<u64>("duration").copied().unwrap_or(10);
        let clicks: Vec<u64> = matches
            .get_many::<u64>("click")
            .map(|values| values.copied().collect())
            .unwrap_or_default();

        let running = Arc::new(AtomicBool::new(true));
        let handler_flag = Arc::clone(&running);
        ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))
            .context("Failed to install Ctrl-C handler")?;

        let stdout = io::stdout();
        return run_json_output(
            &mut stdout.lock(),
            &JsonRun {
                thresholds,
                simulation,
                duration: Duration::from_secs(secs),
                clicks,
            },
            &running,
        );
    }

    run_vitals_app(VitalsAppConfig {
        thresholds,
        simulation,
    })
    .context("Failed to run vitals monitor")
}

/// Demo settings: config defaults, then `--query`, then explicit flags.
pub fn simulation_from_args(matches: &ArgMatches, defaults: SimulationConfig) -> SimulationConfig {
    let mut simulation = defaults;

    if let Some(query) = matches.get_one::<String>("query") {
        QueryOverrides::parse(query).apply(&mut simulation);
    }
    if let Some(delay) = matches.get_one::<u64>("image-delay") {
        simulation.image_delay_ms = *delay;
    }
    if let Some(ttfb) = matches.get_one::<u64>("ttfb") {
        simulation.ttfb_ms = *ttfb;
    }
    if matches.get_flag("skeleton") {
        simulation.skeleton = true;
    }

    simulation
}

/// One JSON line per store change
#[derive(Debug, Serialize)]
pub struct SnapshotRecord {
    pub timestamp: DateTime<Utc>,
    pub metrics: MetricSet,
    pub statuses: [MetricStatus; 4],
}

impl SnapshotRecord {
    pub fn new(metrics: &MetricSet, thresholds: &ThresholdSet) -> Self {
        Self {
            timestamp: Utc::now(),
            metrics: *metrics,
            statuses: evaluate(metrics, thresholds),
        }
    }
}

/// Settings of a JSON-mode run
#[derive(Debug, Clone)]
pub struct JsonRun {
    pub thresholds: ThresholdSet,
    pub simulation: SimulationConfig,
    pub duration: Duration,
    /// Slow clicks in milliseconds, fired one per `CLICK_SPACING`
    pub clicks: Vec<u64>,
}

/// Run in JSON output mode (for scripting).
///
/// Writes one `SnapshotRecord` line per store change until `duration`
/// passes or `running` is cleared, then finalizes the page and flushes the
/// last change.
pub fn run_json_output<W: Write>(out: &mut W, run: &JsonRun, running: &AtomicBool) -> Result<()> {
    run.thresholds.validate()?;

    let store = Arc::new(MetricsStore::new());
    let source = SimulatedSource::start(run.simulation)?;
    register_vitals(&source, &store);
    let mut snapshot_rx = store.subscribe();

    let started = Instant::now();
    let mut pending_clicks = run.clicks.iter().copied().enumerate().peekable();

    let mut emit = |metrics: &MetricSet| -> Result<()> {
        serde_json::to_writer(&mut *out, &SnapshotRecord::new(metrics, &run.thresholds))?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    };

    while running.load(Ordering::SeqCst) && started.elapsed() < run.duration {
        while let Some(&(i, ms)) = pending_clicks.peek() {
            if started.elapsed() < CLICK_SPACING * (i as u32 + 1) {
                break;
            }
            log::info!("Simulated click blocking for {}ms", ms);
            source.record_interaction(Duration::from_millis(ms))?;
            pending_clicks.next();
        }

        if snapshot_rx.has_changed().unwrap_or(false) {
            let snapshot = snapshot_rx.borrow_and_update().clone();
            emit(&snapshot)?;
        }

        std::thread::sleep(Duration::from_millis(20));
    }

    source.finalize();
    if snapshot_rx.has_changed().unwrap_or(false) {
        let snapshot = snapshot_rx.borrow_and_update().clone();
        emit(&snapshot)?;
    }

    Ok(())
}
