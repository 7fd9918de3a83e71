// UI and formatting module

pub mod formatters;
pub mod panel;
pub mod prompts;
pub mod viewport;
pub mod vitals_tui;

// Re-export commonly used items for cleaner imports
pub use formatters::{colorize_severity, format_status_line, format_threshold};
pub use panel::{Anchor, MetricsPanel, PanelEvent, PanelViewState};
pub use prompts::{confirm, dimmed, success};
pub use viewport::{Viewport, ViewportSize};
