//! Per-facet fetchers against the weather provider.
//!
//! Each fetcher builds its URL, performs one GET through the shared
//! [`FetchClient`] and parses the body. Failures never leave a fetcher: they
//! are logged and replaced by the facet's empty default.

use skycast_core::{Config, ProviderConfig, UnitPolicy};
use tracing::instrument;
use url::Url;

use crate::client::FetchClient;
use crate::error::FetchError;
use crate::parse;
use crate::types::{AirQualitySnapshot, Alert, ConditionsSnapshot, Coordinate, ForecastDay, HourlyPoint, Place};

/// Periods requested from the daily forecast endpoint.
pub const DAILY_PERIODS: u32 = 5;
/// Periods requested from the hourly forecast endpoint.
pub const HOURLY_PERIODS: u32 = 6;
/// Place search hits requested per query.
pub const PLACE_RESULTS: u32 = 5;
/// Shortest accepted place search query.
pub const MIN_QUERY_LEN: usize = 3;

/// The five independent weather data categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Conditions,
    DailyForecast,
    HourlyForecast,
    AirQuality,
    Alerts,
}

impl Facet {
    pub fn name(self) -> &'static str {
        match self {
            Self::Conditions => "conditions",
            Self::DailyForecast => "daily_forecast",
            Self::HourlyForecast => "hourly_forecast",
            Self::AirQuality => "air_quality",
            Self::Alerts => "alerts",
        }
    }

    /// First path segment on the provider.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Conditions => "conditions",
            Self::DailyForecast | Self::HourlyForecast => "forecasts",
            Self::AirQuality => "airquality",
            Self::Alerts => "alerts",
        }
    }

    /// Whether the provider's `units` parameter applies to this facet.
    pub fn is_unit_aware(self) -> bool {
        matches!(
            self,
            Self::Conditions | Self::DailyForecast | Self::HourlyForecast
        )
    }

    /// Facet-specific query parameters, before units and credentials.
    fn query(self) -> Vec<(&'static str, String)> {
        match self {
            Self::DailyForecast => vec![
                ("filter", "day".to_string()),
                ("limit", DAILY_PERIODS.to_string()),
            ],
            Self::HourlyForecast => vec![
                ("filter", "1hr".to_string()),
                ("limit", HOURLY_PERIODS.to_string()),
            ],
            Self::Conditions | Self::AirQuality | Self::Alerts => Vec::new(),
        }
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Weather provider endpoint, credentials and HTTP client.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    http: FetchClient,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl WeatherProvider {
    pub fn new(provider: &ProviderConfig, http: FetchClient) -> Self {
        Self {
            http,
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            client_id: provider.client_id.clone(),
            client_secret: provider.client_secret.clone(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let http = FetchClient::from_config(&config.fetch)?;
        Ok(Self::new(&config.provider, http))
    }

    /// Current conditions, or an empty record.
    #[instrument(skip(self), level = "debug")]
    pub async fn conditions(&self, at: Coordinate, units: UnitPolicy) -> ConditionsSnapshot {
        let result = self.fetch(Facet::Conditions, at, Some(units)).await;
        settle(
            Facet::Conditions,
            at,
            result.and_then(|body| parse::try_parse_conditions(&body, units)),
        )
    }

    /// Up to [`DAILY_PERIODS`] daily forecasts, or an empty list.
    #[instrument(skip(self), level = "debug")]
    pub async fn daily_forecast(&self, at: Coordinate, units: UnitPolicy) -> Vec<ForecastDay> {
        let result = self.fetch(Facet::DailyForecast, at, Some(units)).await;
        settle(
            Facet::DailyForecast,
            at,
            result.and_then(|body| parse::try_parse_daily(&body, units)),
        )
    }

    /// Up to [`HOURLY_PERIODS`] hourly points, or an empty list.
    #[instrument(skip(self), level = "debug")]
    pub async fn hourly_forecast(&self, at: Coordinate, units: UnitPolicy) -> Vec<HourlyPoint> {
        let result = self.fetch(Facet::HourlyForecast, at, Some(units)).await;
        settle(
            Facet::HourlyForecast,
            at,
            result.and_then(|body| parse::try_parse_hourly(&body, units)),
        )
    }

    /// Latest air quality, or an empty record.
    #[instrument(skip(self), level = "debug")]
    pub async fn air_quality(&self, at: Coordinate) -> AirQualitySnapshot {
        let result = self.fetch(Facet::AirQuality, at, None).await;
        settle(
            Facet::AirQuality,
            at,
            result.and_then(|body| parse::try_parse_air_quality(&body)),
        )
    }

    /// Active alerts, or an empty list.
    #[instrument(skip(self), level = "debug")]
    pub async fn alerts(&self, at: Coordinate) -> Vec<Alert> {
        let result = self.fetch(Facet::Alerts, at, None).await;
        settle(
            Facet::Alerts,
            at,
            result.and_then(|body| parse::try_parse_alerts(&body)),
        )
    }

    /// Prefix search for places by name.
    ///
    /// Only a too-short query is an error; provider failures yield an empty list.
    #[instrument(skip(self), level = "debug")]
    pub async fn search_places(&self, query: &str) -> Result<Vec<Place>, FetchError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Err(FetchError::QueryTooShort { min: MIN_QUERY_LEN });
        }

        let result = match self.places_url(query) {
            Ok(url) => self.http.get_text(url).await,
            Err(e) => Err(e),
        };

        match result.and_then(|body| parse::try_parse_places(&body)) {
            Ok(places) => Ok(places),
            Err(e) => {
                tracing::warn!(
                    query,
                    cause = e.kind(),
                    error = %e,
                    "place search failed; returning no matches"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Full request URL for a facet, credentials included. Never log it.
    pub fn facet_url(
        &self,
        facet: Facet,
        at: Coordinate,
        units: Option<UnitPolicy>,
    ) -> Result<Url, FetchError> {
        let mut url = Url::parse(&format!(
            "{}/{}/{}",
            self.base_url,
            facet.endpoint(),
            at.to_path_segment()
        ))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in facet.query() {
                pairs.append_pair(key, &value);
            }
            if let Some(units) = units.filter(|_| facet.is_unit_aware()) {
                pairs.append_pair("units", units.as_query_value());
            }
            pairs
                .append_pair("client_id", &self.client_id)
                .append_pair("client_secret", &self.client_secret);
        }

        Ok(url)
    }

    fn places_url(&self, query: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&format!("{}/places/search", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("query", &format!("name:^{query}"))
            .append_pair("limit", &PLACE_RESULTS.to_string())
            .append_pair("client_id", &self.client_id)
            .append_pair("client_secret", &self.client_secret);
        Ok(url)
    }

    async fn fetch(
        &self,
        facet: Facet,
        at: Coordinate,
        units: Option<UnitPolicy>,
    ) -> Result<String, FetchError> {
        let url = self.facet_url(facet, at, units)?;
        self.http.get_text(url).await
    }
}

/// Collapse a facet result into its value, reporting why it came back empty.
fn settle<T: Default>(facet: Facet, at: Coordinate, result: Result<T, FetchError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) if e.is_no_data() => {
            tracing::debug!(
                facet = facet.name(),
                lat = at.latitude,
                lon = at.longitude,
                error = %e,
                "facet has no data"
            );
            T::default()
        }
        Err(e) => {
            tracing::warn!(
                facet = facet.name(),
                lat = at.latitude,
                lon = at.longitude,
                cause = e.kind(),
                error = %e,
                "facet fetch failed; using empty default"
            );
            T::default()
        }
    }
}
