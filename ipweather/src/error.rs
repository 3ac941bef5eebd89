//! Fetch errors carried inside outcome actions
//!
//! Both enums are `Clone + PartialEq` so a failure can travel through the
//! action channel and be stored in a slice as `Errored(cause)`.

use thiserror::Error;

/// Why the geolocation request failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationFetchError {
    /// Connection, TLS or timeout failure
    #[error("location request failed: {0}")]
    Request(String),

    #[error("location service returned HTTP {0}")]
    Status(u16),

    /// Body was not the expected JSON shape
    #[error("could not decode location response: {0}")]
    Decode(String),

    /// The `loc` field was not two valid comma-separated coordinates
    #[error("malformed coordinates: {0:?}")]
    MalformedCoordinates(String),
}

/// Why the weather request failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherFetchError {
    #[error("weather request failed: {0}")]
    Request(String),

    #[error("weather service returned HTTP {0}")]
    Status(u16),

    #[error("could not decode weather response: {0}")]
    Decode(String),

    /// The response had an empty `weather` array
    #[error("weather response has no condition")]
    MissingCondition,
}

impl From<reqwest::Error> for LocationFetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

impl From<reqwest::Error> for WeatherFetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}
