//! Tracked metric keys and the total key-to-value mapping.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::VitalsError;

/// Value stored for a metric that has not been observed yet.
pub const UNMEASURED: f64 = 0.0;

/// The four Core Web Vitals tracked by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    Lcp,
    Cls,
    Inp,
    Ttfb,
}

impl MetricKey {
    /// Display order used by every consumer.
    pub const ALL: [MetricKey; 4] = [
        MetricKey::Lcp,
        MetricKey::Cls,
        MetricKey::Inp,
        MetricKey::Ttfb,
    ];

    pub const fn index(self) -> usize {
        match self {
            MetricKey::Lcp => 0,
            MetricKey::Cls => 1,
            MetricKey::Inp => 2,
            MetricKey::Ttfb => 3,
        }
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            MetricKey::Lcp => "lcp",
            MetricKey::Cls => "cls",
            MetricKey::Inp => "inp",
            MetricKey::Ttfb => "ttfb",
        }
    }

    /// Name used in facility reports ("LCP", "CLS", ...).
    pub const fn report_name(self) -> &'static str {
        match self {
            MetricKey::Lcp => "LCP",
            MetricKey::Cls => "CLS",
            MetricKey::Inp => "INP",
            MetricKey::Ttfb => "TTFB",
        }
    }

    pub const fn long_name(self) -> &'static str {
        match self {
            MetricKey::Lcp => "largest-contentful-paint",
            MetricKey::Cls => "cumulative-layout-shift",
            MetricKey::Inp => "interaction-to-next-paint",
            MetricKey::Ttfb => "time-to-first-byte",
        }
    }

    /// Unit label appended by callers after the formatted value.
    /// Layout shift is a dimensionless score.
    pub const fn unit(self) -> &'static str {
        match self {
            MetricKey::Cls => "",
            _ => "ms",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.report_name())
    }
}

impl FromStr for MetricKey {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        MetricKey::ALL
            .into_iter()
            .find(|key| {
                needle.eq_ignore_ascii_case(key.short_name())
                    || needle.eq_ignore_ascii_case(key.long_name())
            })
            .ok_or_else(|| VitalsError::unknown_metric(needle))
    }
}

/// Latest known value of every tracked metric.
///
/// All four keys are always present; `UNMEASURED` stands in for
/// "not observed yet".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricSet {
    values: [f64; 4],
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: MetricKey) -> f64 {
        self.values[key.index()]
    }

    /// Copy of this set with one entry replaced.
    pub fn with(&self, key: MetricKey, value: f64) -> Self {
        let mut next = *self;
        next.values[key.index()] = value;
        next
    }

    pub fn is_measured(&self, key: MetricKey) -> bool {
        self.get(key) != UNMEASURED
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, f64)> + '_ {
        MetricKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

impl Index<MetricKey> for MetricSet {
    type Output = f64;

    fn index(&self, key: MetricKey) -> &f64 {
        &self.values[key.index()]
    }
}

impl Serialize for MetricSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MetricKey::ALL.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.short_name(), &value)?;
        }
        map.end()
    }
}

/// A single measurement delivered by the performance-observation facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub name: String,
    pub value: f64,
}

impl MetricReport {
    pub fn new(key: MetricKey, value: f64) -> Self {
        Self {
            name: key.report_name().to_string(),
            value,
        }
    }
}
