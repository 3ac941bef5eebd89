//! Integration tests for WeatherApi using wiremock.

use ipweather::api::WeatherApi;
use ipweather::config::Config;
use ipweather::error::{LocationFetchError, WeatherFetchError};
use ipweather::state::{Location, Weather};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> WeatherApi {
    let config = Config::new(
        "test-key",
        format!("{}/json", server.uri()),
        format!("{}/data/2.5/weather", server.uri()),
    );
    WeatherApi::new(&config).unwrap()
}

fn london_body() -> serde_json::Value {
    serde_json::json!({
        "ip": "203.0.113.7",
        "city": "London",
        "region": "England",
        "country": "GB",
        "loc": "51.5,-0.12",
        "timezone": "Europe/London"
    })
}

fn clear_body() -> serde_json::Value {
    serde_json::json!({
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 18, "feels_like": 17.2, "humidity": 40},
        "wind": {"speed": 3.1, "deg": 240},
        "name": "London"
    })
}

#[tokio::test]
async fn test_fetch_location_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let location = client(&mock_server).fetch_location().await.unwrap();

    assert_eq!(
        location,
        Location {
            city: "London".into(),
            country: "GB".into(),
            lat: 51.5,
            lon: -0.12,
        }
    );
}

#[tokio::test]
async fn test_fetch_location_sends_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .and(query_param("token", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = Config::new("k", format!("{}/json", mock_server.uri()), "http://unused");
    config.ipinfo_token = Some("secret".into());
    let api = WeatherApi::new(&config).unwrap();

    assert!(api.fetch_location().await.is_ok());
}

#[tokio::test]
async fn test_fetch_location_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server).fetch_location().await;
    assert_eq!(result, Err(LocationFetchError::Status(429)));
}

#[tokio::test]
async fn test_fetch_location_bad_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server).fetch_location().await;
    assert!(matches!(result, Err(LocationFetchError::Decode(_))));
}

#[tokio::test]
async fn test_fetch_location_missing_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"loc": "51.5,-0.12", "country": "GB"})),
        )
        .mount(&mock_server)
        .await;

    let result = client(&mock_server).fetch_location().await;
    assert!(matches!(result, Err(LocationFetchError::Decode(_))));
}

#[tokio::test]
async fn test_fetch_location_malformed_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city": "Nowhere",
            "country": "ZZ",
            "loc": "north,west"
        })))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server).fetch_location().await;
    assert_eq!(
        result,
        Err(LocationFetchError::MalformedCoordinates("north,west".into()))
    );
}

#[tokio::test]
async fn test_fetch_location_unreachable() {
    let config = Config::new("k", "http://127.0.0.1:9/json", "http://127.0.0.1:9/weather");
    let api = WeatherApi::new(&config).unwrap();

    let result = api.fetch_location().await;
    assert!(matches!(result, Err(LocationFetchError::Request(_))));
}

#[tokio::test]
async fn test_fetch_weather_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(header("accept", "application/json"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clear_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let weather = client(&mock_server)
        .fetch_weather(51.5, -0.12)
        .await
        .unwrap();

    assert_eq!(
        weather,
        Weather {
            id: 800,
            status: "Clear".into(),
            temp: 18.0,
            wind_speed: 3.1,
        }
    );
}

#[tokio::test]
async fn test_fetch_weather_empty_condition() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "weather": [],
            "main": {"temp": 18},
            "wind": {"speed": 3.1}
        })))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server).fetch_weather(51.5, -0.12).await;
    assert_eq!(result, Err(WeatherFetchError::MissingCondition));
}

#[tokio::test]
async fn test_fetch_weather_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key"
        })))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server).fetch_weather(51.5, -0.12).await;
    assert_eq!(result, Err(WeatherFetchError::Status(401)));
}

#[tokio::test]
async fn test_fetch_weather_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(clear_body())
                .set_delay(std::time::Duration::from_millis(1500)),
        )
        .mount(&mock_server)
        .await;

    let mut config = Config::new(
        "test-key",
        "http://unused",
        format!("{}/data/2.5/weather", mock_server.uri()),
    );
    config.timeout_secs = 1;
    let api = WeatherApi::new(&config).unwrap();

    let result = api.fetch_weather(51.5, -0.12).await;
    assert!(matches!(result, Err(WeatherFetchError::Request(_))));
}
