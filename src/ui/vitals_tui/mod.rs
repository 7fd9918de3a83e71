//! Terminal User Interface for the web vitals demo.
//!
//! Renders a demo page with a floating metrics panel using ratatui.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{run_vitals_app, VitalsApp, VitalsAppConfig};
pub use event_handler::{VitalsEvent, SLOW_BUTTONS_MS};
pub use render::render_panel;
pub use widgets::severity_color;
