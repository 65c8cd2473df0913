//! Unit-dependent key resolution.
//!
//! The provider does not convert values; it publishes each quantity twice
//! under different keys (`tempC`/`tempF`). The active [`UnitPolicy`] picks
//! which key wins. If the winning key is missing the other one is used, and
//! only when both are missing is the field absent.

use serde_json::Value;
use skycast_core::UnitPolicy;

/// Metric and imperial provider keys for one semantic field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitKeys {
    pub metric: &'static str,
    pub imperial: &'static str,
}

impl UnitKeys {
    pub const fn new(metric: &'static str, imperial: &'static str) -> Self {
        Self { metric, imperial }
    }

    /// Keys in lookup order for the given policy.
    pub fn ordered(self, units: UnitPolicy) -> [&'static str; 2] {
        match units {
            UnitPolicy::Metric => [self.metric, self.imperial],
            UnitPolicy::Imperial => [self.imperial, self.metric],
        }
    }

    /// Value under the preferred key, else the other key. `null` counts as missing.
    pub fn resolve(self, record: &Value, units: UnitPolicy) -> Option<&Value> {
        self.ordered(units)
            .into_iter()
            .find_map(|key| record.get(key).filter(|v| !v.is_null()))
    }
}

pub const TEMP: UnitKeys = UnitKeys::new("tempC", "tempF");
pub const FEELS_LIKE: UnitKeys = UnitKeys::new("feelslikeC", "feelslikeF");
pub const WIND_SPEED: UnitKeys = UnitKeys::new("windSpeedKPH", "windSpeedMPH");
pub const VISIBILITY: UnitKeys = UnitKeys::new("visibilityKM", "visibilityMI");
pub const MAX_TEMP: UnitKeys = UnitKeys::new("maxTempC", "maxTempF");
pub const MIN_TEMP: UnitKeys = UnitKeys::new("minTempC", "minTempF");
pub const AVG_TEMP: UnitKeys = UnitKeys::new("avgTempC", "avgTempF");
