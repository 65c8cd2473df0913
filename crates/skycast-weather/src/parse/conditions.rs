use skycast_core::UnitPolicy;

use super::open_envelope;
use crate::error::FetchError;
use crate::json::Record;
use crate::types::ConditionsSnapshot;
use crate::units::{FEELS_LIKE, TEMP, VISIBILITY, WIND_SPEED};

/// Current conditions from `response[0].periods[0]`.
pub fn try_parse_conditions(body: &str, units: UnitPolicy) -> Result<ConditionsSnapshot, FetchError> {
    let doc = open_envelope(body)?;
    let period = Record::at(&doc, "/response/0/periods/0")
        .ok_or(FetchError::MissingData("response[0].periods[0]"))?;

    Ok(ConditionsSnapshot {
        temp: period.unit_f64(TEMP, units),
        feels_like: period.unit_f64(FEELS_LIKE, units),
        humidity: period.i32("humidity"),
        wind_speed: period.unit_f64(WIND_SPEED, units),
        wind_direction: period.text("windDir"),
        pressure: period.f64("pressureMB"),
        visibility: period.unit_f64(VISIBILITY, units),
        uv_index: period.i32("uvi"),
        cloud_cover: period.i32("sky"),
        description: period.text("weather"),
        icon: period.text("icon"),
    })
}

pub fn parse_conditions(body: &str, units: UnitPolicy) -> ConditionsSnapshot {
    try_parse_conditions(body, units).unwrap_or_default()
}
