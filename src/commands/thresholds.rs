//! Threshold configurator: show, set and reset the "good" cutoffs.

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::{Config, MetricKey};
use crate::ui::{confirm, dimmed, format_threshold, success};

pub fn execute(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", sub_matches)) => show(sub_matches),
        Some(("set", sub_matches)) => set(sub_matches),
        Some(("reset", sub_matches)) => reset(sub_matches),
        _ => {
            println!("Use 'vitals thresholds --help' for more information.");
            Ok(())
        }
    }
}

fn show(matches: &ArgMatches) -> Result<()> {
    let path = super::config_path(matches)?;
    let config = Config::load_from(&path)?;

    println!("{}", "Configured thresholds (good ≤ threshold, poor > 1.5×):".white());
    for key in MetricKey::ALL {
        println!(
            "  {:<5} {}",
            key.report_name().bold(),
            format_threshold(key, config.thresholds.get(key)).cyan()
        );
    }
    dimmed(&format!("Config file: {}", path.display()));
    Ok(())
}

fn set(matches: &ArgMatches) -> Result<()> {
    let key: MetricKey = matches
        .get_one::<String>("metric")
        .context("Metric argument is required")?
        .parse()?;
    let value = *matches
        .get_one::<f64>("value")
        .context("Value argument is required")?;

    let path = super::config_path(matches)?;
    let mut config = Config::load_for_update(&path)?;
    config.thresholds.set(key, value)?;
    config.save_to(&path)?;

    log::info!("Threshold for {} set to {}", key, value);
    success(&format!(
        "✓ {} threshold set to {}",
        key.report_name(),
        format_threshold(key, value)
    ));
    Ok(())
}

fn reset(matches: &ArgMatches) -> Result<()> {
    let path = super::config_path(matches)?;
    let mut config = Config::load_for_update(&path)?;

    if !matches.get_flag("yes") && !confirm("Reset all thresholds to their defaults? [y/N]")? {
        dimmed("Nothing changed.");
        return Ok(());
    }

    config.reset_thresholds();
    config.save_to(&path)?;
    success("✓ Thresholds reset to defaults");
    Ok(())
}
