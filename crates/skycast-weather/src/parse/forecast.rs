use serde_json::Value;
use skycast_core::UnitPolicy;

use super::{open_envelope, response_items};
use crate::error::FetchError;
use crate::json::Record;
use crate::types::{ForecastDay, HourlyPoint};
use crate::units::{AVG_TEMP, MAX_TEMP, MIN_TEMP};

/// Every period of every `response[]` entry, in document order.
/// Entries without a `periods` array contribute nothing.
fn periods(doc: &Value) -> Result<impl Iterator<Item = Record<'_>>, FetchError> {
    Ok(response_items(doc)?
        .filter_map(|item| item.items("periods"))
        .flatten())
}

/// Daily forecast periods, provider order preserved.
pub fn try_parse_daily(body: &str, units: UnitPolicy) -> Result<Vec<ForecastDay>, FetchError> {
    let doc = open_envelope(body)?;
    let days = periods(&doc)?
        .map(|period| ForecastDay {
            timestamp: period.i64("timestamp"),
            temp_max: period.unit_f64(MAX_TEMP, units),
            temp_min: period.unit_f64(MIN_TEMP, units),
            description: period.text("weather"),
            icon: period.text("icon"),
        })
        .collect();
    Ok(days)
}

pub fn parse_daily(body: &str, units: UnitPolicy) -> Vec<ForecastDay> {
    try_parse_daily(body, units).unwrap_or_default()
}

/// Hourly forecast points, provider order preserved.
pub fn try_parse_hourly(body: &str, units: UnitPolicy) -> Result<Vec<HourlyPoint>, FetchError> {
    let doc = open_envelope(body)?;
    let hours = periods(&doc)?
        .map(|period| HourlyPoint {
            timestamp: period.i64("timestamp"),
            temp: period.unit_f64(AVG_TEMP, units),
            icon: period.text("icon"),
        })
        .collect();
    Ok(hours)
}

pub fn parse_hourly(body: &str, units: UnitPolicy) -> Vec<HourlyPoint> {
    try_parse_hourly(body, units).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn daily_body(n: i64) -> String {
        let periods: Vec<Value> = (0..n)
            .map(|i| {
                json!({
                    "timestamp": 1_620_000_000 + i * 86_400,
                    "maxTempC": 20 + i, "maxTempF": 68 + i,
                    "minTempC": 10 + i, "minTempF": 50 + i,
                    "weather": format!("day {i}"),
                    "icon": "sunny.png"
                })
            })
            .collect();
        json!({"success": true, "response": [{"periods": periods}]}).to_string()
    }

    #[test]
    fn test_daily_preserves_order_and_length() {
        let days = parse_daily(&daily_body(5), UnitPolicy::Metric);
        assert_eq!(days.len(), 5);
        for (i, day) in days.iter().enumerate() {
            let i = i as i64;
            assert_eq!(day.timestamp, Some(1_620_000_000 + i * 86_400));
            assert_eq!(day.temp_max, Some((20 + i) as f64));
            assert_eq!(day.temp_min, Some((10 + i) as f64));
            assert_eq!(day.description, Some(format!("day {i}")));
        }
    }

    #[test]
    fn test_daily_imperial() {
        let days = parse_daily(&daily_body(2), UnitPolicy::Imperial);
        assert_eq!(days[0].temp_max, Some(68.0));
        assert_eq!(days[1].temp_min, Some(51.0));
    }

    #[test]
    fn test_daily_partial_period() {
        let body = r#"{"success":true,"response":[{"periods":[{"timestamp":1620000000,"maxTempC":25.0,"minTempC":15.0}]}]}"#;
        let days = parse_daily(body, UnitPolicy::Imperial);
        assert_eq!(
            days,
            vec![ForecastDay {
                timestamp: Some(1_620_000_000),
                temp_max: Some(25.0),
                temp_min: Some(15.0),
                description: None,
                icon: None,
            }]
        );
    }

    #[test]
    fn test_periods_across_response_entries_are_concatenated() {
        let body = r#"{"success":true,"response":[
            {"periods":[{"timestamp":1},{"timestamp":2}]},
            {"loc":{}},
            {"periods":[{"timestamp":3}]}
        ]}"#;
        let stamps: Vec<_> = parse_daily(body, UnitPolicy::Metric)
            .into_iter()
            .map(|d| d.timestamp)
            .collect();
        assert_eq!(stamps, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_hourly_points() {
        let body = r#"{"success":true,"response":[{"periods":[
            {"timestamp":1620000000,"avgTempC":12.5,"avgTempF":54.5,"icon":"cloudy.png"},
            {"timestamp":1620003600,"avgTempF":55.4}
        ]}]}"#;

        let metric = parse_hourly(body, UnitPolicy::Metric);
        assert_eq!(metric.len(), 2);
        assert_eq!(metric[0].temp, Some(12.5));
        assert_eq!(metric[0].icon.as_deref(), Some("cloudy.png"));
        // Metric falls back to the only key present
        assert_eq!(metric[1].temp, Some(55.4));
        assert_eq!(metric[1].icon, None);

        let imperial = parse_hourly(body, UnitPolicy::Imperial);
        assert_eq!(imperial[0].temp, Some(54.5));
    }

    #[test]
    fn test_empty_response_is_empty_list() {
        let body = r#"{"success":true,"response":[]}"#;
        assert!(try_parse_daily(body, UnitPolicy::Metric).unwrap().is_empty());
        assert!(try_parse_hourly(body, UnitPolicy::Metric).unwrap().is_empty());
    }

    #[test]
    fn test_failure_envelopes_are_empty() {
        let rejected = daily_body(3).replace("\"success\":true", "\"success\":false");
        assert!(parse_daily(&rejected, UnitPolicy::Metric).is_empty());
        assert!(parse_hourly(&rejected, UnitPolicy::Metric).is_empty());
        assert!(parse_daily("{}", UnitPolicy::Metric).is_empty());
        assert!(parse_hourly("", UnitPolicy::Metric).is_empty());
        assert!(parse_hourly("{\"success\":true", UnitPolicy::Metric).is_empty());
    }
}
