//! Plain-text rendering of snapshots and place lists.

use chrono::{DateTime, Utc};
use skycast_weather::{Place, UnitPolicy, WeatherSnapshot};
use std::fmt::Write;

struct Labels {
    temp: &'static str,
    speed: &'static str,
    distance: &'static str,
}

fn labels(units: UnitPolicy) -> Labels {
    match units {
        UnitPolicy::Metric => Labels {
            temp: "°C",
            speed: "km/h",
            distance: "km",
        },
        UnitPolicy::Imperial => Labels {
            temp: "°F",
            speed: "mph",
            distance: "mi",
        },
    }
}

fn or_dash(value: Option<f64>, suffix: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}{suffix}"))
}

fn day_label(time: Option<DateTime<Utc>>) -> String {
    time.map_or_else(|| "?".to_string(), |t| t.format("%a %d %b").to_string())
}

fn hour_label(time: Option<DateTime<Utc>>) -> String {
    time.map_or_else(|| "?".to_string(), |t| t.format("%H:%M").to_string())
}

/// Human-readable report; absent fields print as `-`, empty facets are skipped.
pub fn snapshot_text(snapshot: &WeatherSnapshot, units: UnitPolicy) -> String {
    let l = labels(units);
    let mut out = String::new();

    let c = &snapshot.conditions;
    if c.is_empty() {
        out.push_str("Current conditions unavailable\n");
    } else {
        let _ = writeln!(
            out,
            "Now: {} (feels like {}){}",
            or_dash(c.temp, l.temp),
            or_dash(c.feels_like, l.temp),
            c.description
                .as_deref()
                .map(|d| format!(", {d}"))
                .unwrap_or_default()
        );
        let _ = writeln!(
            out,
            "  Wind {} {}  Humidity {}  Pressure {}",
            or_dash(c.wind_speed, l.speed),
            c.wind_direction.as_deref().unwrap_or("-"),
            c.humidity.map_or_else(|| "-".to_string(), |h| format!("{h}%")),
            or_dash(c.pressure, " mb"),
        );
        let _ = writeln!(
            out,
            "  Visibility {}  UV {}  Clouds {}",
            or_dash(c.visibility, l.distance),
            c.uv_index.map_or_else(|| "-".to_string(), |u| u.to_string()),
            c.cloud_cover.map_or_else(|| "-".to_string(), |s| format!("{s}%")),
        );
    }

    if !snapshot.forecast.is_empty() {
        out.push_str("\nForecast:\n");
        for day in &snapshot.forecast {
            let _ = writeln!(
                out,
                "  {:<11} {:>8} / {:<8} {}",
                day_label(day.time()),
                or_dash(day.temp_max, l.temp),
                or_dash(day.temp_min, l.temp),
                day.description.as_deref().unwrap_or("")
            );
        }
    }

    if !snapshot.hourly.is_empty() {
        out.push_str("\nNext hours (UTC):\n");
        for point in &snapshot.hourly {
            let _ = writeln!(
                out,
                "  {}  {}",
                hour_label(point.time()),
                or_dash(point.temp, l.temp)
            );
        }
    }

    let aq = &snapshot.air_quality;
    if !aq.is_empty() {
        let _ = writeln!(
            out,
            "\nAir quality: AQI {} {}",
            aq.aqi.map_or_else(|| "-".to_string(), |a| a.to_string()),
            aq.category.as_deref().unwrap_or("")
        );
        let _ = writeln!(
            out,
            "  PM2.5 {}  PM10 {}  O3 {}  NO2 {}",
            or_dash(aq.pm25, ""),
            or_dash(aq.pm10, ""),
            or_dash(aq.o3, ""),
            or_dash(aq.no2, "")
        );
    }

    if !snapshot.alerts.is_empty() {
        out.push_str("\nAlerts:\n");
        for alert in &snapshot.alerts {
            let _ = writeln!(
                out,
                "  [{}] {}: {}",
                alert.severity.as_deref().unwrap_or("-"),
                alert.kind.as_deref().unwrap_or("alert"),
                alert.message.as_deref().unwrap_or("").trim()
            );
        }
    }

    out
}

/// One place per line: `name, state, country (lat, lon)`.
pub fn places_text(places: &[Place]) -> String {
    if places.is_empty() {
        return "No matching places\n".to_string();
    }

    let mut out = String::new();
    for place in places {
        let label = [&place.name, &place.state, &place.country]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        match place.coordinate() {
            Some(at) => {
                let _ = writeln!(out, "{label} ({at})");
            }
            None => {
                let _ = writeln!(out, "{label}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_weather::{Alert, ConditionsSnapshot, ForecastDay};

    #[test]
    fn test_empty_snapshot_reports_unavailable() {
        let text = snapshot_text(&WeatherSnapshot::default(), UnitPolicy::Metric);
        assert_eq!(text, "Current conditions unavailable\n");
    }

    #[test]
    fn test_conditions_use_unit_labels() {
        let snapshot = WeatherSnapshot {
            conditions: ConditionsSnapshot {
                temp: Some(68.9),
                description: Some("Sunny".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let text = snapshot_text(&snapshot, UnitPolicy::Imperial);
        assert!(text.starts_with("Now: 68.9°F (feels like -), Sunny\n"));
        assert!(text.contains("Wind - -"));
    }

    #[test]
    fn test_forecast_dates_from_timestamps() {
        let snapshot = WeatherSnapshot {
            forecast: vec![ForecastDay {
                // 2023-11-14 22:13:20 UTC
                timestamp: Some(1_700_000_000),
                temp_max: Some(10.0),
                temp_min: Some(2.0),
                ..Default::default()
            }],
            alerts: vec![Alert {
                kind: Some("WI.Y".into()),
                message: Some("Wind advisory\n".into()),
                severity: None,
            }],
            ..Default::default()
        };

        let text = snapshot_text(&snapshot, UnitPolicy::Metric);
        assert!(text.contains("Tue 14 Nov"));
        assert!(text.contains("10.0°C"));
        assert!(text.contains("[-] WI.Y: Wind advisory"));
    }

    #[test]
    fn test_places_text() {
        let places = vec![
            Place {
                name: "Berlin".into(),
                country: "Germany".into(),
                state: String::new(),
                latitude: Some(52.52),
                longitude: Some(13.405),
            },
            Place {
                name: "Nowhere".into(),
                ..Default::default()
            },
        ];

        assert_eq!(
            places_text(&places),
            "Berlin, Germany (52.52, 13.405)\nNowhere\n"
        );
        assert_eq!(places_text(&[]), "No matching places\n");
    }
}
