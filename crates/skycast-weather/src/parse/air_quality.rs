use super::open_envelope;
use crate::error::FetchError;
use crate::json::Record;
use crate::types::AirQualitySnapshot;

/// Concentration reading inside one pollutant object.
const POLLUTANT_VALUE: &str = "valueMG";

/// Latest air quality period from `response[0].periods[0]`.
pub fn try_parse_air_quality(body: &str) -> Result<AirQualitySnapshot, FetchError> {
    let doc = open_envelope(body)?;
    let latest = Record::at(&doc, "/response/0/periods/0")
        .ok_or(FetchError::MissingData("response[0].periods[0]"))?;

    let mut snapshot = AirQualitySnapshot {
        aqi: latest.i32("aqi"),
        category: latest.text("category"),
        ..Default::default()
    };

    if let Some(pollutants) = latest.get("pollutants") {
        let reading = |key: &str| pollutants.get(key).and_then(|p| p.f64(POLLUTANT_VALUE));
        snapshot.pm25 = reading("pm2p5");
        snapshot.pm10 = reading("pm10");
        snapshot.o3 = reading("o3");
        snapshot.no2 = reading("no2");
    }

    Ok(snapshot)
}

pub fn parse_air_quality(body: &str) -> AirQualitySnapshot {
    try_parse_air_quality(body).unwrap_or_default()
}
