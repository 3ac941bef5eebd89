//! Reducers - (state, action) -> (changed, effects)
//!
//! The root reducer starts request cycles for intents and hands every
//! outcome to both slice reducers. A slice reducer folds the outcomes it
//! owns and returns `false` for the others, leaving its slice untouched.

use ipweather_core::DispatchResult;

use crate::action::{Action, Intent, Outcome};
use crate::effect::Effect;
use crate::state::{AppState, LocationState, WeatherState};

/// Root reducer over the whole state tree
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Intent(Intent::RequestLocation) => {
            let epoch = state.location.begin();
            DispatchResult::changed_with(Effect::FetchLocation { epoch })
        }

        Action::Intent(Intent::RequestWeather { lat, lon }) => {
            state.weather_for = state.location.epoch();
            let epoch = state.weather.begin();
            DispatchResult::changed_with(Effect::FetchWeather { epoch, lat, lon })
        }

        Action::Outcome(outcome) => {
            let location_changed = location_reducer(&mut state.location, &outcome);
            let weather_changed = weather_reducer(&mut state.weather, &outcome);
            (location_changed || weather_changed).into()
        }

        // Handled by the runtime loop before dispatch
        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Fold an outcome into the location slice
pub fn location_reducer(state: &mut LocationState, outcome: &Outcome) -> bool {
    match outcome {
        Outcome::LocationSucceeded { epoch, location } => {
            state.resolve(*epoch, Ok(location.clone()))
        }
        Outcome::LocationFailed { epoch, error } => state.resolve(*epoch, Err(error.clone())),
        Outcome::WeatherSucceeded { .. } | Outcome::WeatherFailed { .. } => false,
    }
}

/// Fold an outcome into the weather slice
pub fn weather_reducer(state: &mut WeatherState, outcome: &Outcome) -> bool {
    match outcome {
        Outcome::WeatherSucceeded { epoch, weather } => state.resolve(*epoch, Ok(weather.clone())),
        Outcome::WeatherFailed { epoch, error } => state.resolve(*epoch, Err(error.clone())),
        Outcome::LocationSucceeded { .. } | Outcome::LocationFailed { .. } => false,
    }
}
