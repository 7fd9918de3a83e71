//! One-shot classification of a metric value.

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::{classify, display_value, MetricKey, MetricStatus};
use crate::ui::format_status_line;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let status = status_from_args(matches)?;
    println!("{}", format_status_line(&status));
    Ok(())
}

/// Build the status for `<metric> <value> [--threshold T]`, falling back to
/// the configured threshold.
pub fn status_from_args(matches: &ArgMatches) -> Result<MetricStatus> {
    let key: MetricKey = matches
        .get_one::<String>("metric")
        .context("Metric argument is required")?
        .parse()?;
    let value = *matches
        .get_one::<f64>("value")
        .context("Value argument is required")?;
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("Value must be a finite, non-negative number (got {})", value);
    }

    let threshold = match matches.get_one::<f64>("threshold") {
        Some(threshold) => *threshold,
        None => super::load_config(matches)?.thresholds.get(key),
    };

    Ok(MetricStatus {
        key,
        value,
        threshold,
        severity: classify(value, threshold),
        display: display_value(key, value),
    })
}
