//! Application state - single source of truth
//!
//! Two slices, each folded from outcomes by its own reducer. Components
//! receive `&AppState` as props and never write to it.

use ipweather_core::{Epoch, Slice};

use crate::error::{LocationFetchError, WeatherFetchError};

/// Where the machine is, according to the geolocation service
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions at a location
#[derive(Clone, Debug, PartialEq)]
pub struct Weather {
    /// Condition code, e.g. 800 for clear sky
    pub id: u32,
    /// Condition group, e.g. "Clear"
    pub status: String,
    /// Degrees Celsius
    pub temp: f64,
    /// Metres per second
    pub wind_speed: f64,
}

pub type LocationState = Slice<Location, LocationFetchError>;
pub type WeatherState = Slice<Weather, WeatherFetchError>;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub location: LocationState,
    pub weather: WeatherState,
    /// Location epoch that was current when weather was last requested
    pub weather_for: Epoch,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while either request is in flight
    pub fn is_loading(&self) -> bool {
        self.location.is_loading() || self.weather.is_loading()
    }

    /// True when the weather slice belongs to the resolved location.
    ///
    /// A refreshed location lands before the weather request it triggers,
    /// so until then the weather slice still describes the old location.
    pub fn weather_matches_location(&self) -> bool {
        self.location.ready().is_some() && self.weather_for == self.location.epoch()
    }
}
