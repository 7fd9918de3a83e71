//! Demo-page query parameters (`?imageDelay=3000&skeleton=true`).
//!
//! These only configure the simulated page; the metrics pipeline never
//! reads them.

use super::simulator::SimulationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOverrides {
    pub image_delay_ms: Option<u64>,
    pub skeleton: bool,
}

impl QueryOverrides {
    /// Parse a query string, with or without the leading `?` or a full URL.
    ///
    /// `imageDelay` accepts a leading non-negative integer and is ignored
    /// otherwise. `skeleton` is enabled only by the exact value `true`.
    /// The first occurrence of a parameter wins.
    pub fn parse(query: &str) -> Self {
        let query = match url::Url::parse(query) {
            Ok(parsed) => parsed.query().unwrap_or_default().to_string(),
            Err(_) => query.trim().trim_start_matches('?').to_string(),
        };

        let mut image_delay = None;
        let mut skeleton = None;

        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match name.as_ref() {
                "imageDelay" if image_delay.is_none() => image_delay = Some(value.into_owned()),
                "skeleton" if skeleton.is_none() => skeleton = Some(value.into_owned()),
                _ => {}
            }
        }

        Self {
            image_delay_ms: image_delay.as_deref().and_then(parse_leading_integer),
            skeleton: skeleton.as_deref() == Some("true"),
        }
    }

    pub fn apply(&self, config: &mut SimulationConfig) {
        if let Some(delay) = self.image_delay_ms {
            config.image_delay_ms = delay;
        }
        config.skeleton = self.skeleton;
    }
}

/// Leading decimal digits of `raw`, after optional whitespace and `+`.
fn parse_leading_integer(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
