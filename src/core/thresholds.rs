//! "Good" cutoffs per metric.

use serde::{Deserialize, Serialize};

use super::metrics::MetricKey;
use crate::error::{Result, VitalsError};

/// Threshold configuration.
///
/// Time metrics are in milliseconds, layout shift is a unitless score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSet {
    pub lcp: f64,
    pub cls: f64,
    pub inp: f64,
    pub ttfb: f64,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            lcp: 2500.0,
            cls: 0.1,
            inp: 200.0,
            ttfb: 600.0,
        }
    }
}

impl ThresholdSet {
    pub fn get(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Lcp => self.lcp,
            MetricKey::Cls => self.cls,
            MetricKey::Inp => self.inp,
            MetricKey::Ttfb => self.ttfb,
        }
    }

    /// Set one threshold after checking it.
    pub fn set(&mut self, key: MetricKey, value: f64) -> Result<()> {
        validate_threshold(key, value)?;
        match key {
            MetricKey::Lcp => self.lcp = value,
            MetricKey::Cls => self.cls = value,
            MetricKey::Inp => self.inp = value,
            MetricKey::Ttfb => self.ttfb = value,
        }
        Ok(())
    }

    /// Reject non-finite or negative thresholds.
    pub fn validate(&self) -> Result<()> {
        for key in MetricKey::ALL {
            validate_threshold(key, self.get(key))?;
        }
        Ok(())
    }
}

fn validate_threshold(key: MetricKey, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(VitalsError::config(format!(
            "threshold for {} must be a finite, non-negative number (got {})",
            key, value
        )));
    }
    Ok(())
}
