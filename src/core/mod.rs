// Core metrics pipeline: state, thresholds, classification and sources

pub mod classifier;
pub mod config;
pub mod metrics;
pub mod query;
pub mod simulator;
pub mod source;
pub mod store;
pub mod thresholds;

// Re-export commonly used items
pub use classifier::{classify, display_value, evaluate, format_value, MetricStatus, Severity};
pub use config::Config;
pub use metrics::{MetricKey, MetricReport, MetricSet, UNMEASURED};
pub use simulator::{SimulatedSource, SimulationConfig};
pub use source::{register_vitals, MetricSource, ReportCallback, SubscribeOptions};
pub use store::MetricsStore;
pub use thresholds::ThresholdSet;
