use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic point. Not range-checked; the provider rejects nonsense.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `lat,lon` as the provider expects it in the path.
    pub fn to_path_segment(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Current conditions. Every field may be absent independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionsSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ConditionsSnapshot {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One daily forecast period, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ForecastDay {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// One hourly forecast point, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl HourlyPoint {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// Latest air quality reading. Pollutants are only set when the provider
/// sent the matching pollutant object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualitySnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm25: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub o3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm10: Option<f64>,
}

impl AirQualitySnapshot {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Active weather alert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// Composite result of one aggregation call.
///
/// All five facets are always present; a failed facet holds its empty default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    #[serde(rename = "current")]
    pub conditions: ConditionsSnapshot,
    pub forecast: Vec<ForecastDay>,
    pub hourly: Vec<HourlyPoint>,
    pub air_quality: AirQualitySnapshot,
    pub alerts: Vec<Alert>,
}

impl WeatherSnapshot {
    /// True when every facet is at its empty default.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
            && self.forecast.is_empty()
            && self.hourly.is_empty()
            && self.air_quality.is_empty()
            && self.alerts.is_empty()
    }
}

/// Place search hit. Missing text fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub country: String,
    pub state: String,
    #[serde(rename = "lat", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "lon", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Place {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.latitude?, self.longitude?))
    }
}
