use std::sync::atomic::AtomicBool;
use std::time::Duration;

use serde_json::Value;
use vitals::commands::watch::{run_json_output, JsonRun, SnapshotRecord};
use vitals::core::{MetricKey, MetricSet, SimulationConfig, ThresholdSet};

#[test]
fn test_snapshot_record_json_shape() {
    let metrics = MetricSet::default()
        .with(MetricKey::Lcp, 2600.0)
        .with(MetricKey::Cls, 0.05);
    let record = SnapshotRecord::new(&metrics, &ThresholdSet::default());

    let json: Value = serde_json::to_value(&record).unwrap();
    assert!(json["timestamp"].is_string());
    assert_eq!(json["metrics"]["lcp"], 2600.0);
    assert_eq!(json["metrics"]["cls"], 0.05);
    assert_eq!(json["metrics"]["inp"], 0.0);

    let statuses = json["statuses"].as_array().unwrap();
    assert_eq!(statuses.len(), 4);
    assert_eq!(statuses[MetricKey::Lcp.index()]["severity"], "needs-improvement");
    assert_eq!(statuses[MetricKey::Lcp.index()]["display"], "2600 ms");
    assert_eq!(statuses[MetricKey::Cls.index()]["severity"], "good");
    assert_eq!(statuses[MetricKey::Inp.index()]["severity"], "unmeasured");
    assert_eq!(statuses[MetricKey::Inp.index()]["display"], "Not measured");
}

#[test]
fn test_json_run_emits_records_and_scripted_clicks() {
    let run = JsonRun {
        thresholds: ThresholdSet::default(),
        simulation: SimulationConfig {
            ttfb_ms: 10,
            image_delay_ms: 50,
            skeleton: false,
        },
        duration: Duration::from_millis(1500),
        clicks: vec![300],
    };
    let running = AtomicBool::new(true);
    let mut out = Vec::new();

    run_json_output(&mut out, &run, &running).unwrap();

    let records: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert!(records.len() >= 2);

    let last = records.last().unwrap();
    assert_eq!(last["metrics"]["ttfb"], 10.0);
    assert_eq!(last["metrics"]["lcp"], 50.0);
    assert_eq!(last["metrics"]["cls"], 0.15);
    assert_eq!(last["metrics"]["inp"], 300.0);
    assert_eq!(
        last["statuses"][MetricKey::Inp.index()]["severity"],
        "needs-improvement"
    );
}

#[test]
fn test_json_run_rejects_invalid_thresholds() {
    let run = JsonRun {
        thresholds: ThresholdSet {
            lcp: -1.0,
            ..Default::default()
        },
        simulation: SimulationConfig::default(),
        duration: Duration::from_millis(100),
        clicks: Vec::new(),
    };
    let mut out = Vec::new();

    assert!(run_json_output(&mut out, &run, &AtomicBool::new(true)).is_err());
    assert!(out.is_empty());
}
