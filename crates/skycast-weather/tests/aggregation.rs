use serde_json::json;
use skycast_core::ProviderConfig;
use skycast_weather::{
    ConditionsSnapshot, Coordinate, FetchClient, FetchError, UnitPolicy, WeatherAggregator,
    WeatherProvider, WeatherSnapshot,
};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BERLIN: Coordinate = Coordinate {
    latitude: 52.52,
    longitude: 13.405,
};

fn aggregator_for(base_url: String, timeout: Duration) -> Result<WeatherAggregator, FetchError> {
    let config = ProviderConfig {
        base_url,
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
    };
    let http = FetchClient::new(timeout, "skycast-test")?;
    Ok(WeatherAggregator::new(WeatherProvider::new(&config, http)))
}

fn aggregator(server: &MockServer, timeout: Duration) -> Result<WeatherAggregator, FetchError> {
    aggregator_for(server.uri(), timeout)
}

async fn mount_fallback(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn assert_all_defaults(snapshot: &WeatherSnapshot) {
    assert!(snapshot.is_empty(), "{snapshot:?}");
    assert_eq!(
        serde_json::to_value(snapshot).ok(),
        Some(json!({"current": {}, "forecast": [], "hourly": [], "airQuality": {}, "alerts": []}))
    );
}

#[tokio::test]
async fn test_every_facet_failing_with_status_yields_defaults() {
    let server = MockServer::start().await;
    mount_fallback(&server, ResponseTemplate::new(500)).await;

    let snapshot = aggregator(&server, Duration::from_secs(5))
        .unwrap()
        .snapshot(BERLIN, UnitPolicy::Metric)
        .await;
    assert_all_defaults(&snapshot);
}

#[tokio::test]
async fn test_every_facet_empty_body_yields_defaults() {
    let server = MockServer::start().await;
    mount_fallback(&server, ResponseTemplate::new(200)).await;

    let snapshot = aggregator(&server, Duration::from_secs(5))
        .unwrap()
        .snapshot(BERLIN, UnitPolicy::Metric)
        .await;
    assert_all_defaults(&snapshot);
}

#[tokio::test]
async fn test_every_facet_malformed_yields_defaults() {
    let server = MockServer::start().await;
    mount_fallback(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let snapshot = aggregator(&server, Duration::from_secs(5))
        .unwrap()
        .snapshot(BERLIN, UnitPolicy::Imperial)
        .await;
    assert_all_defaults(&snapshot);
}

#[tokio::test]
async fn test_unreachable_provider_yields_defaults() {
    let aggregator =
        aggregator_for("http://127.0.0.1:1".to_string(), Duration::from_secs(2)).unwrap();

    let snapshot = aggregator.snapshot(BERLIN, UnitPolicy::Metric).await;
    assert_all_defaults(&snapshot);
}

#[tokio::test]
async fn test_conditions_only_scenario() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/conditions/52.52,13.405"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": [{"periods": [{"tempC": 20.5, "humidity": 60, "weather": "Sunny"}]}]
        })))
        .mount(&server)
        .await;
    mount_fallback(&server, ResponseTemplate::new(200).set_body_string("{}")).await;

    let snapshot = aggregator(&server, Duration::from_secs(5))
        .unwrap()
        .snapshot(BERLIN, UnitPolicy::Metric)
        .await;

    assert_eq!(
        snapshot.conditions,
        ConditionsSnapshot {
            temp: Some(20.5),
            humidity: Some(60),
            description: Some("Sunny".to_string()),
            ..Default::default()
        }
    );
    assert!(snapshot.forecast.is_empty());
    assert!(snapshot.hourly.is_empty());
    assert!(snapshot.air_quality.is_empty());
    assert!(snapshot.alerts.is_empty());

    let value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(
        value["current"],
        json!({"temp": 20.5, "humidity": 60, "description": "Sunny"})
    );
    assert_eq!(value.as_object().unwrap().len(), 5);
}

#[tokio::test]
async fn test_full_snapshot_in_imperial_units() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/conditions/52.52,13.405"))
        .and(query_param("units", "e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": [{"periods": [{
                "tempC": 20.5, "tempF": 68.9,
                "windSpeedKPH": 10, "windSpeedMPH": 6.2,
                "visibilityKM": 10
            }]}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecasts/52.52,13.405"))
        .and(query_param("filter", "day"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": [{"periods": [
                {"timestamp": 1700000000, "maxTempC": 10, "maxTempF": 50, "minTempC": 2, "minTempF": 35.6},
                {"timestamp": 1700086400, "maxTempC": 12, "minTempC": 3}
            ]}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecasts/52.52,13.405"))
        .and(query_param("filter", "1hr"))
        .and(query_param("limit", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": [{"periods": [
                {"timestamp": 1700000000, "avgTempC": 5, "avgTempF": 41, "icon": "cloudy.png"}
            ]}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/airquality/52.52,13.405"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": [{"periods": [{
                "aqi": 42,
                "category": "good",
                "pollutants": {"pm2p5": {"valueMG": 8.5}}
            }]}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/alerts/52.52,13.405"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": []
        })))
        .mount(&server)
        .await;

    let snapshot = aggregator(&server, Duration::from_secs(5))
        .unwrap()
        .snapshot(BERLIN, UnitPolicy::Imperial)
        .await;

    assert_eq!(snapshot.conditions.temp, Some(68.9));
    assert_eq!(snapshot.conditions.wind_speed, Some(6.2));
    // No imperial visibility published; metric value is used as-is
    assert_eq!(snapshot.conditions.visibility, Some(10.0));

    assert_eq!(snapshot.forecast.len(), 2);
    assert_eq!(snapshot.forecast[0].temp_max, Some(50.0));
    assert_eq!(snapshot.forecast[0].temp_min, Some(35.6));
    assert_eq!(snapshot.forecast[1].temp_max, Some(12.0));

    assert_eq!(snapshot.hourly.len(), 1);
    assert_eq!(snapshot.hourly[0].temp, Some(41.0));

    assert_eq!(snapshot.air_quality.aqi, Some(42));
    assert_eq!(snapshot.air_quality.pm25, Some(8.5));

    assert!(snapshot.alerts.is_empty());
}

#[tokio::test]
async fn test_slow_facet_does_not_block_the_others() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/alerts/52.52,13.405"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "response": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/conditions/52.52,13.405"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": [{"periods": [{"tempC": 1.5}]}]
        })))
        .mount(&server)
        .await;
    mount_fallback(&server, ResponseTemplate::new(404)).await;

    let started = std::time::Instant::now();
    let snapshot = aggregator(&server, Duration::from_millis(300))
        .unwrap()
        .snapshot(BERLIN, UnitPolicy::Metric)
        .await;

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(snapshot.conditions.temp, Some(1.5));
    assert!(snapshot.alerts.is_empty());
}
