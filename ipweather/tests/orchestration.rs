//! End-to-end tests of the fetch pipeline against mock services.
//!
//! The runtime is driven headless: actions are pulled from the queue and
//! processed until it stays quiet for a while.

use std::time::Duration;

use ipweather::action::{Action, Intent, Outcome, request_location};
use ipweather::api::WeatherApi;
use ipweather::app::{AppRuntime, build_runtime};
use ipweather::config::Config;
use ipweather::error::LocationFetchError;
use ipweather::orchestrator::Orchestrator;
use ipweather::state::{Location, Weather};
use ipweather_core::{Epoch, assert_emitted, assert_not_emitted, count_emitted};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUIET: Duration = Duration::from_millis(300);

fn orchestrator(server: &MockServer) -> Orchestrator {
    let config = Config::new(
        "test-key",
        format!("{}/json", server.uri()),
        format!("{}/data/2.5/weather", server.uri()),
    );
    Orchestrator::new(WeatherApi::new(&config).unwrap())
}

fn london() -> Location {
    Location {
        city: "London".into(),
        country: "GB".into(),
        lat: 51.5,
        lon: -0.12,
    }
}

async fn mount_location(server: &MockServer, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "city": "London",
                    "country": "GB",
                    "loc": "51.5,-0.12"
                }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

async fn mount_weather(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "weather": [{"id": 800, "main": "Clear"}],
            "main": {"temp": 18},
            "wind": {"speed": 3.1}
        })))
        .mount(server)
        .await;
}

/// Process queued actions until none arrive for `QUIET`
async fn settle(runtime: &mut AppRuntime, orchestrator: &Orchestrator) -> Vec<Action> {
    let mut processed = Vec::new();
    while let Ok(Some(action)) = tokio::time::timeout(QUIET, runtime.next_action()).await {
        processed.push(action.clone());
        runtime.process(action, |effect, ctx| orchestrator.handle(effect, ctx));
    }
    processed
}

#[tokio::test]
async fn test_location_then_weather() {
    let mock_server = MockServer::start().await;
    mount_location(&mock_server, Duration::ZERO).await;
    mount_weather(&mock_server).await;

    let orchestrator = orchestrator(&mock_server);
    let mut runtime = build_runtime();
    runtime.enqueue(request_location());

    let processed = settle(&mut runtime, &orchestrator).await;

    let names: Vec<_> = processed
        .iter()
        .map(ipweather_core::Action::name)
        .collect();
    assert_eq!(
        names,
        vec![
            "RequestLocation",
            "LocationSucceeded",
            "RequestWeather",
            "WeatherSucceeded"
        ]
    );

    let state = runtime.state();
    assert_eq!(state.location.ready(), Some(&london()));
    assert_eq!(
        state.weather.ready(),
        Some(&Weather {
            id: 800,
            status: "Clear".into(),
            temp: 18.0,
            wind_speed: 3.1,
        })
    );
    assert!(runtime.tasks().is_empty());
}

#[tokio::test]
async fn test_location_failure_never_requests_weather() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let orchestrator = orchestrator(&mock_server);
    let mut runtime = build_runtime();
    runtime.enqueue(request_location());

    let processed = settle(&mut runtime, &orchestrator).await;

    assert_emitted!(
        processed,
        Action::Outcome(Outcome::LocationFailed {
            error: LocationFetchError::Status(500),
            ..
        })
    );
    assert_not_emitted!(processed, Action::Intent(Intent::RequestWeather { .. }));
    assert_eq!(
        runtime.state().location.error(),
        Some(&LocationFetchError::Status(500))
    );
    assert!(!runtime.state().weather.is_loading());
    assert_eq!(runtime.state().weather.epoch(), Epoch::ZERO);
}

#[tokio::test]
async fn test_latest_location_request_wins() {
    let mock_server = MockServer::start().await;
    mount_location(&mock_server, Duration::from_millis(100)).await;
    mount_weather(&mock_server).await;

    let orchestrator = orchestrator(&mock_server);
    let mut runtime = build_runtime();
    runtime.enqueue(request_location());
    runtime.enqueue(request_location());

    let processed = settle(&mut runtime, &orchestrator).await;

    // The first task was aborted when the second one started
    assert_eq!(
        count_emitted!(processed, Action::Outcome(Outcome::LocationSucceeded { .. })),
        1
    );
    assert_emitted!(
        processed,
        Action::Outcome(Outcome::LocationSucceeded { epoch, .. }) if *epoch == Epoch::new(2)
    );
    assert_eq!(runtime.state().location.epoch(), Epoch::new(2));
    assert_eq!(runtime.state().location.ready(), Some(&london()));
    assert_eq!(
        count_emitted!(processed, Action::Intent(Intent::RequestWeather { .. })),
        1
    );

    // A late outcome from the superseded request is dropped
    let before = runtime.state().clone();
    let changed = runtime.process(
        Outcome::LocationSucceeded {
            epoch: Epoch::new(1),
            location: Location {
                city: "Paris".into(),
                country: "FR".into(),
                lat: 48.85,
                lon: 2.35,
            },
        }
        .into(),
        |effect, ctx| orchestrator.handle(effect, ctx),
    );
    assert!(!changed);
    assert_eq!(runtime.state(), &before);
}
