// Vitals Library - Public API

// Re-export error types
pub mod error;
pub use error::{Result, VitalsError};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;
pub use core::metrics::{MetricKey, MetricSet};
pub use core::store::MetricsStore;
pub use core::thresholds::ThresholdSet;

/// Initialize logging.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies.
pub fn init_logging(default_level: log::LevelFilter) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level.as_str()),
    )
    .init();
}
