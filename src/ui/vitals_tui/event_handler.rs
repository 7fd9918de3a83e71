use crossterm::event::{KeyCode, KeyEvent};

use crate::ui::panel::PanelEvent;

/// Busy-wait durations of the slow buttons on the demo page.
pub const SLOW_BUTTONS_MS: [u64; 3] = [50, 300, 600];

/// Events that can occur in the vitals TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalsEvent {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Interaction with the floating panel
    Panel(PanelEvent),
    /// Click a demo button that blocks for the given milliseconds
    SlowClick(u64),
    /// Terminal resized to (width, height)
    Resize(u16, u16),
    /// No action
    None,
}

impl VitalsEvent {
    pub fn from_key(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => VitalsEvent::Quit,
            KeyCode::Char('?') | KeyCode::Char('h') => VitalsEvent::ToggleHelp,
            KeyCode::Char('e') => VitalsEvent::Panel(PanelEvent::ToggleExpand),
            KeyCode::Char('x') => VitalsEvent::Panel(PanelEvent::ToggleVisibility),
            KeyCode::Char('d') => VitalsEvent::Panel(PanelEvent::Dismiss),
            KeyCode::Char('i') => VitalsEvent::Panel(PanelEvent::ToggleInfo),
            KeyCode::Up | KeyCode::Char('k') => VitalsEvent::Panel(PanelEvent::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => VitalsEvent::Panel(PanelEvent::SelectNext),
            KeyCode::Char('1') => VitalsEvent::SlowClick(SLOW_BUTTONS_MS[0]),
            KeyCode::Char('2') => VitalsEvent::SlowClick(SLOW_BUTTONS_MS[1]),
            KeyCode::Char('3') => VitalsEvent::SlowClick(SLOW_BUTTONS_MS[2]),
            _ => VitalsEvent::None,
        }
    }
}
