//! Actions: intents ask for work, outcomes report what happened
//!
//! Both are closed sum types. Every reducer matches them exhaustively, so
//! adding a variant is a compile error until each slice decides what it
//! means for it.

use ipweather_core::{ActionSummary, Epoch};

use crate::error::{LocationFetchError, WeatherFetchError};
use crate::state::{Location, Weather};

/// Something the user or the coordinate watcher wants done
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    RequestLocation,
    RequestWeather { lat: f64, lon: f64 },
}

/// Result of a fetch, tagged with the epoch of the request that produced it
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    LocationSucceeded {
        epoch: Epoch,
        location: Location,
    },
    LocationFailed {
        epoch: Epoch,
        error: LocationFetchError,
    },
    WeatherSucceeded {
        epoch: Epoch,
        weather: Weather,
    },
    WeatherFailed {
        epoch: Epoch,
        error: WeatherFetchError,
    },
}

/// What the store consumes
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Intent(Intent),
    Outcome(Outcome),
    /// Exit the application
    Quit,
}

pub fn request_location() -> Action {
    Action::Intent(Intent::RequestLocation)
}

pub fn request_weather(lat: f64, lon: f64) -> Action {
    Action::Intent(Intent::RequestWeather { lat, lon })
}

impl From<Intent> for Action {
    fn from(intent: Intent) -> Self {
        Action::Intent(intent)
    }
}

impl From<Outcome> for Action {
    fn from(outcome: Outcome) -> Self {
        Action::Outcome(outcome)
    }
}

impl ipweather_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Intent(Intent::RequestLocation) => "RequestLocation",
            Action::Intent(Intent::RequestWeather { .. }) => "RequestWeather",
            Action::Outcome(Outcome::LocationSucceeded { .. }) => "LocationSucceeded",
            Action::Outcome(Outcome::LocationFailed { .. }) => "LocationFailed",
            Action::Outcome(Outcome::WeatherSucceeded { .. }) => "WeatherSucceeded",
            Action::Outcome(Outcome::WeatherFailed { .. }) => "WeatherFailed",
            Action::Quit => "Quit",
        }
    }
}

/// Concise log lines instead of the full Debug output
impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::Intent(Intent::RequestWeather { lat, lon }) => {
                format!("RequestWeather {{ {lat:.4}, {lon:.4} }}")
            }
            Action::Outcome(Outcome::LocationSucceeded { epoch, location }) => format!(
                "LocationSucceeded {epoch} {{ {}, {} }}",
                location.city, location.country
            ),
            Action::Outcome(Outcome::LocationFailed { epoch, error }) => {
                format!("LocationFailed {epoch} {{ {error} }}")
            }
            Action::Outcome(Outcome::WeatherSucceeded { epoch, weather }) => format!(
                "WeatherSucceeded {epoch} {{ {} ({}), {:.1}°C }}",
                weather.status, weather.id, weather.temp
            ),
            Action::Outcome(Outcome::WeatherFailed { epoch, error }) => {
                format!("WeatherFailed {epoch} {{ {error} }}")
            }
            _ => format!("{:?}", self),
        }
    }
}
