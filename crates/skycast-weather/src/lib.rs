//! Weather aggregation for skycast.
//!
//! Fans one coordinate out to five provider endpoints (current conditions,
//! daily forecast, hourly forecast, air quality, alerts) and merges the
//! answers into a single [`WeatherSnapshot`]. Facets fail independently.

pub mod aggregator;
pub mod client;
pub mod error;
pub mod json;
pub mod parse;
pub mod provider;
pub mod types;
pub mod units;

pub use aggregator::WeatherAggregator;
pub use client::FetchClient;
pub use error::FetchError;
pub use provider::{Facet, WeatherProvider};
pub use skycast_core::UnitPolicy;
pub use types::{
    AirQualitySnapshot, Alert, ConditionsSnapshot, Coordinate, ForecastDay, HourlyPoint, Place,
    WeatherSnapshot,
};
