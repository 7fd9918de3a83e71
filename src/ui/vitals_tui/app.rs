use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::{register_vitals, MetricsStore, SimulatedSource, SimulationConfig, ThresholdSet};
use crate::ui::panel::MetricsPanel;
use crate::ui::viewport::{Viewport, ViewportSize};

use super::event_handler::VitalsEvent;
use super::render::render_ui;

/// How long the "Operation completed!" note stays on screen.
const CLICK_NOTE_TTL: Duration = Duration::from_secs(2);

/// Vitals application state
pub struct VitalsApp {
    pub panel: MetricsPanel,
    pub store: Arc<MetricsStore>,
    pub source: SimulatedSource,
    pub viewport: Viewport,
    pub simulation: SimulationConfig,
    pub started: Instant,
    pub should_quit: bool,
    pub show_help: bool,
    /// Last slow click: (button ms, measured duration, when)
    pub last_click: Option<(u64, Duration, Instant)>,
}

impl VitalsApp {
    pub fn new(config: VitalsAppConfig, size: ViewportSize) -> Result<Self> {
        config
            .thresholds
            .validate()
            .context("Refusing to start with invalid thresholds")?;

        let store = Arc::new(MetricsStore::new());
        let source =
            SimulatedSource::start(config.simulation).context("Failed to start simulated page")?;
        register_vitals(&source, &store);

        let viewport = Viewport::new(size);
        let panel = MetricsPanel::mount(&store, config.thresholds, &viewport);

        Ok(Self {
            panel,
            store,
            source,
            viewport,
            simulation: config.simulation,
            started: Instant::now(),
            should_quit: false,
            show_help: false,
            last_click: None,
        })
    }

    /// Handle keyboard and terminal events
    pub fn handle_event(&mut self, event: VitalsEvent) {
        match event {
            VitalsEvent::Quit => self.should_quit = true,
            VitalsEvent::ToggleHelp => self.show_help = !self.show_help,
            VitalsEvent::Panel(panel_event) => self.panel.handle_event(panel_event),
            VitalsEvent::SlowClick(ms) => self.slow_click(ms),
            VitalsEvent::Resize(width, height) => {
                self.viewport.resize(width, height);
            }
            VitalsEvent::None => {}
        }
    }

    /// Run a deliberately blocking click handler and report how long the
    /// interaction took.
    fn slow_click(&mut self, ms: u64) {
        let started = Instant::now();
        busy_wait(Duration::from_millis(ms));
        let elapsed = started.elapsed();

        if let Err(e) = self.source.record_interaction(elapsed) {
            log::warn!("{}", e);
        }
        self.last_click = Some((ms, elapsed, Instant::now()));
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    pub fn image_loaded(&self) -> bool {
        self.elapsed_ms() >= self.simulation.image_delay_ms.max(self.simulation.ttfb_ms)
    }

    /// Note shown under the buttons after a click.
    pub fn click_note(&self) -> Option<String> {
        let (ms, elapsed, at) = self.last_click?;
        (at.elapsed() < CLICK_NOTE_TTL).then(|| {
            format!(
                "Operation completed! ({}ms button, {}ms blocked)",
                ms,
                elapsed.as_millis()
            )
        })
    }
}

/// Spin on the current thread for `duration`.
fn busy_wait(duration: Duration) {
    let started = Instant::now();
    while started.elapsed() < duration {
        std::hint::spin_loop();
    }
}

/// Configuration for the vitals app
#[derive(Debug, Clone, Default)]
pub struct VitalsAppConfig {
    pub thresholds: ThresholdSet,
    pub simulation: SimulationConfig,
}

/// Run the vitals TUI application
pub fn run_vitals_app(config: VitalsAppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_loop(&mut terminal, config);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: VitalsAppConfig,
) -> Result<()> {
    let size = terminal.size().context("Failed to read terminal size")?;
    let mut app = VitalsApp::new(config, ViewportSize::new(size.width, size.height))?;
    let tick_rate = Duration::from_millis(100);

    loop {
        app.panel.refresh();
        terminal.draw(|frame| render_ui(frame, &app))?;

        if event::poll(tick_rate).context("Event poll failed")? {
            let vitals_event = match event::read().context("Event read failed")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => VitalsEvent::from_key(key),
                Event::Resize(width, height) => VitalsEvent::Resize(width, height),
                _ => VitalsEvent::None,
            };
            app.handle_event(vitals_event);
        }

        if app.should_quit {
            break;
        }
    }

    app.source.finalize();
    log::info!("Final metrics: {:?}", app.store.snapshot());
    Ok(())
}
