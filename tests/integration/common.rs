use parking_lot::Mutex;
use vitals::core::{MetricKey, MetricReport, MetricSource, ReportCallback, SubscribeOptions};

/// Facility driven by hand from the test body.
#[derive(Default)]
pub struct ManualSource {
    subscriptions: Mutex<Vec<(MetricKey, SubscribeOptions, ReportCallback)>>,
}

impl ManualSource {
    /// Fire a report at every subscriber of `key`.
    pub fn fire(&self, key: MetricKey, value: f64) {
        for (sub_key, _, callback) in self.subscriptions.lock().iter() {
            if *sub_key == key {
                callback(MetricReport::new(key, value));
            }
        }
    }

    /// Fire a raw report (any name) at every subscriber.
    pub fn fire_raw(&self, report: MetricReport) {
        for (_, _, callback) in self.subscriptions.lock().iter() {
            callback(report.clone());
        }
    }

    pub fn options(&self, key: MetricKey) -> Option<SubscribeOptions> {
        self.subscriptions
            .lock()
            .iter()
            .find(|(sub_key, _, _)| *sub_key == key)
            .map(|(_, options, _)| *options)
    }
}

impl MetricSource for ManualSource {
    fn subscribe(&self, key: MetricKey, callback: ReportCallback, options: SubscribeOptions) {
        self.subscriptions.lock().push((key, options, callback));
    }
}
