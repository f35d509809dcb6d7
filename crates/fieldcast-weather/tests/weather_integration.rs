//! Integration tests for the forecast provider and location resolver using wiremock.

use fieldcast_weather::{
    Coordinate, LocationError, LocationQuery, LocationResolver, Units, WeatherError,
    WeatherProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn interval(dt_txt: &str, temp_min: f64, temp_max: f64, rain: Option<f64>) -> serde_json::Value {
    let mut entry = serde_json::json!({
        "dt": 0,
        "dt_txt": dt_txt,
        "main": {
            "temp": (temp_min + temp_max) / 2.0,
            "temp_min": temp_min,
            "temp_max": temp_max,
            "humidity": 75
        },
        "wind": {"speed": 4.0},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]
    });
    if let Some(mm) = rain {
        entry["rain"] = serde_json::json!({"3h": mm});
    }
    entry
}

fn provider(server: &MockServer) -> WeatherProvider {
    WeatherProvider::with_client(reqwest::Client::new(), server.uri(), "test-key", Units::Metric)
}

fn resolver(server: &MockServer) -> LocationResolver {
    LocationResolver::new(
        reqwest::Client::new(),
        format!("{}/json/", server.uri()),
        provider(server),
    )
}

#[tokio::test]
async fn test_forecast_success_and_daily_rollup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "51.57"))
        .and(query_param("lon", "5.39"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cod": "200",
            "list": [
                interval("2024-01-01 00:00:00", 10.0, 12.0, None),
                interval("2024-01-01 03:00:00", 5.0, 11.0, Some(2.0)),
                interval("2024-01-01 06:00:00", 8.0, 14.0, Some(3.0)),
                interval("2024-01-02 00:00:00", 6.0, 9.0, None),
            ]
        })))
        .mount(&mock_server)
        .await;

    let forecast = provider(&mock_server)
        .forecast(Coordinate::new(51.57, 5.39))
        .await
        .unwrap();

    assert_eq!(forecast.samples.len(), 4);
    let current = forecast.current().unwrap();
    assert_eq!(current.temperature, 11.0);
    assert_eq!(current.precipitation, 0.0);

    let days = forecast.daily();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].temp_min, 5.0);
    assert_eq!(days[0].temp_max, 14.0);
    assert_eq!(days[0].precipitation, 5.0);
}

#[tokio::test]
async fn test_forecast_without_list_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"cod": "200"})))
        .mount(&mock_server)
        .await;

    let forecast = provider(&mock_server)
        .forecast(Coordinate::new(0.0, 0.0))
        .await
        .unwrap();
    assert!(forecast.is_empty());
}

#[tokio::test]
async fn test_forecast_http_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key"
        })))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server)
        .forecast(Coordinate::new(0.0, 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, WeatherError::Status(401)));
    assert_eq!(err.user_message(), "Failed to fetch weather data");
}

#[tokio::test]
async fn test_city_lookup_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Eindhoven"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coord": {"lon": 5.4697, "lat": 51.4416},
            "name": "Eindhoven"
        })))
        .mount(&mock_server)
        .await;

    let coordinate = resolver(&mock_server)
        .resolve(&LocationQuery::City("Eindhoven".to_string()))
        .await
        .unwrap();
    assert_eq!(coordinate, Coordinate::new(51.4416, 5.4697));
}

#[tokio::test]
async fn test_city_lookup_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let err = resolver(&mock_server)
        .resolve(&LocationQuery::City("Atlantis".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, LocationError::CityNotFound));
    assert_eq!(err.to_string(), "City not found");
}

#[tokio::test]
async fn test_ip_location_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "country": "Netherlands",
            "lat": 52.37,
            "lon": 4.89
        })))
        .mount(&mock_server)
        .await;

    let coordinate = resolver(&mock_server)
        .resolve(&LocationQuery::CurrentLocation)
        .await
        .unwrap();
    assert_eq!(coordinate, Coordinate::new(52.37, 4.89));
}

#[tokio::test]
async fn test_ip_location_provider_failure_carries_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range",
            "query": "10.0.0.1"
        })))
        .mount(&mock_server)
        .await;

    let err = resolver(&mock_server).from_ip().await.unwrap_err();
    match err {
        LocationError::Provider(message) => assert_eq!(message, "private range"),
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_ip_location_http_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let err = resolver(&mock_server).from_ip().await.unwrap_err();
    assert!(matches!(err, LocationError::Status(503)));
}

#[tokio::test]
async fn test_unreachable_services_keep_path_specific_messages() {
    let mock_server = MockServer::start().await;
    let provider = provider(&mock_server);
    let resolver = resolver(&mock_server);
    drop(mock_server);

    let err = provider.coordinate_for_city("Utrecht").await.unwrap_err();
    assert!(matches!(err, LocationError::CityLookup(_)));
    assert_eq!(
        err.user_message(),
        "Unable to reach the weather service. Check your connection."
    );

    let err = resolver.from_ip().await.unwrap_err();
    assert!(matches!(err, LocationError::Network(_)));
    assert_eq!(
        err.user_message(),
        "Unable to retrieve your location. Please enter a city manually."
    );
}
