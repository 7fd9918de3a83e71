use std::fs;

use tempfile::TempDir;
use vitals::core::{Config, MetricKey, ThresholdSet};

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
    assert!(!path.exists());
}

#[test]
fn test_threshold_changes_persist() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let mut config = Config::load_from(&path).unwrap();
    config.thresholds.set(MetricKey::Lcp, 4000.0).unwrap();
    config.demo.image_delay_ms = 3000;
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.thresholds.get(MetricKey::Lcp), 4000.0);
    assert_eq!(reloaded.thresholds.get(MetricKey::Cls), 0.1);
    assert_eq!(reloaded.demo.image_delay_ms, 3000);
}

#[test]
fn test_reset_keeps_demo_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    let mut config = Config::default();
    config.thresholds.set(MetricKey::Inp, 500.0).unwrap();
    config.demo.skeleton = true;
    config.reset_thresholds();
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.thresholds, ThresholdSet::default());
    assert!(reloaded.demo.skeleton);
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{ "thresholds": { "lcp": 3000 } }"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.thresholds.lcp, 3000.0);
    assert_eq!(config.thresholds.ttfb, 600.0);
    assert_eq!(config.demo.ttfb_ms, 120);
}

#[test]
fn test_corrupt_and_empty_files_fall_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    fs::write(&path, "").unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());

    fs::write(&path, "{ not json").unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_negative_threshold_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{ "thresholds": { "inp": -5 } }"#).unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_partial_file_keeps_demo_settings_through_update() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "thresholds": { "lcp": 3000 }, "demo": { "skeleton": true } }"#,
    )
    .unwrap();

    let mut config = Config::load_for_update(&path).unwrap();
    config.thresholds.set(MetricKey::Cls, 0.2).unwrap();
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.thresholds.lcp, 3000.0);
    assert_eq!(reloaded.thresholds.cls, 0.2);
    assert!(reloaded.demo.skeleton);
}

#[test]
fn test_update_refuses_unreadable_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_for_update(&path).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn test_zero_ttfb_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{ "demo": { "ttfb_ms": 0 } }"#).unwrap();

    assert!(Config::load_from(&path).is_err());
}
