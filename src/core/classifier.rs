//! Severity classification against configurable thresholds.
//!
//! Maps each metric value to a severity bucket and a display string.

use serde::{Deserialize, Serialize};

use super::metrics::{MetricKey, MetricSet, UNMEASURED};
use super::thresholds::ThresholdSet;

/// Ceiling of the "needs improvement" bucket, as a multiple of the threshold.
pub const NEEDS_IMPROVEMENT_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Unmeasured,
    Good,
    NeedsImprovement,
    Poor,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Unmeasured => "unmeasured",
            Severity::Good => "good",
            Severity::NeedsImprovement => "needs-improvement",
            Severity::Poor => "poor",
        }
    }
}

/// Evaluated state of one metric, recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricStatus {
    pub key: MetricKey,
    pub value: f64,
    pub threshold: f64,
    pub severity: Severity,
    /// Value with its unit, or "Not measured".
    pub display: String,
}

/// Classify a value against its "good" threshold.
pub fn classify(value: f64, threshold: f64) -> Severity {
    if value == UNMEASURED {
        Severity::Unmeasured
    } else if value <= threshold {
        Severity::Good
    } else if value <= threshold * NEEDS_IMPROVEMENT_FACTOR {
        Severity::NeedsImprovement
    } else {
        Severity::Poor
    }
}

/// Format a value for display, without unit.
pub fn format_value(key: MetricKey, value: f64) -> String {
    match key {
        MetricKey::Cls => format!("{:.3}", value),
        _ => format!("{:.0}", value),
    }
}

/// Format a value with its unit, or "Not measured" for the sentinel.
pub fn display_value(key: MetricKey, value: f64) -> String {
    if value == UNMEASURED {
        return "Not measured".to_string();
    }
    let unit = key.unit();
    if unit.is_empty() {
        format_value(key, value)
    } else {
        format!("{} {}", format_value(key, value), unit)
    }
}

/// Evaluate every metric in display order.
pub fn evaluate(metrics: &MetricSet, thresholds: &ThresholdSet) -> [MetricStatus; 4] {
    MetricKey::ALL.map(|key| {
        let value = metrics.get(key);
        let threshold = thresholds.get(key);
        MetricStatus {
            key,
            value,
            threshold,
            severity: classify(value, threshold),
            display: display_value(key, value),
        }
    })
}
