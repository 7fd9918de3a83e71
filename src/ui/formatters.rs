use colored::{ColoredString, Colorize};

use crate::core::{MetricKey, MetricStatus, Severity};

/// Color a piece of text by severity for plain terminal output
pub fn colorize_severity(text: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Unmeasured => text.bright_black(),
        Severity::Good => text.green(),
        Severity::NeedsImprovement => text.yellow(),
        Severity::Poor => text.red(),
    }
}

/// Threshold with unit, e.g. "2500 ms" or "0.100"
pub fn format_threshold(key: MetricKey, threshold: f64) -> String {
    let value = crate::core::format_value(key, threshold);
    if key.unit().is_empty() {
        value
    } else {
        format!("{} {}", value, key.unit())
    }
}

/// One status line: "LCP   1800 ms   good (threshold 2500 ms)"
pub fn format_status_line(status: &MetricStatus) -> String {
    format!(
        "{:<5} {:>14}   {} (threshold {})",
        status.key.report_name(),
        status.display,
        colorize_severity(status.severity.label(), status.severity),
        format_threshold(status.key, status.threshold)
    )
}
