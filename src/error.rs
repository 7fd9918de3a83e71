use std::io;
use thiserror::Error;

/// Custom error type for the vitals library
#[derive(Error, Debug)]
pub enum VitalsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Invalid value for {metric}: {value}")]
    InvalidValue { metric: String, value: f64 },

    #[error("Metric source error: {0}")]
    MetricSource(String),
}

/// Result type alias for the vitals library
pub type Result<T> = std::result::Result<T, VitalsError>;

impl VitalsError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        VitalsError::Config(msg.into())
    }

    /// Create an unknown metric error
    pub fn unknown_metric<S: Into<String>>(name: S) -> Self {
        VitalsError::UnknownMetric(name.into())
    }

    pub fn invalid_value<S: Into<String>>(metric: S, value: f64) -> Self {
        VitalsError::InvalidValue {
            metric: metric.into(),
            value,
        }
    }

    pub fn metric_source<S: Into<String>>(msg: S) -> Self {
        VitalsError::MetricSource(msg.into())
    }
}
