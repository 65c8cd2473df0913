//! Concurrent fan-out over all five facets.

use skycast_core::{Config, UnitPolicy};
use tracing::instrument;

use crate::error::FetchError;
use crate::provider::WeatherProvider;
use crate::types::{Coordinate, WeatherSnapshot};

/// Builds a [`WeatherSnapshot`] from independent provider requests.
#[derive(Debug, Clone)]
pub struct WeatherAggregator {
    provider: WeatherProvider,
}

impl WeatherAggregator {
    pub fn new(provider: WeatherProvider) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Ok(Self::new(WeatherProvider::from_config(config)?))
    }

    pub fn provider(&self) -> &WeatherProvider {
        &self.provider
    }

    /// Fetch every facet concurrently and assemble the result.
    ///
    /// Never fails. A facet that could not be fetched or parsed holds its
    /// empty default; the others are unaffected. Latency is that of the
    /// slowest facet, bounded by the client timeout.
    #[instrument(skip(self))]
    pub async fn snapshot(&self, at: Coordinate, units: UnitPolicy) -> WeatherSnapshot {
        let (conditions, forecast, hourly, air_quality, alerts) = tokio::join!(
            self.provider.conditions(at, units),
            self.provider.daily_forecast(at, units),
            self.provider.hourly_forecast(at, units),
            self.provider.air_quality(at),
            self.provider.alerts(at),
        );

        tracing::debug!(
            has_conditions = !conditions.is_empty(),
            forecast_days = forecast.len(),
            hourly_points = hourly.len(),
            has_air_quality = !air_quality.is_empty(),
            alerts = alerts.len(),
            "weather snapshot assembled"
        );

        WeatherSnapshot {
            conditions,
            forecast,
            hourly,
            air_quality,
            alerts,
        }
    }
}
