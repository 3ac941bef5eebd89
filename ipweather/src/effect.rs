//! Effects - side effects declared by the reducer
//!
//! Effects are returned from the reducer and handled by the
//! [`Orchestrator`](crate::orchestrator::Orchestrator). Each carries the
//! epoch its outcome must be tagged with.

use ipweather_core::Epoch;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Geolocate the machine
    FetchLocation { epoch: Epoch },
    /// Fetch current conditions at the given coordinates
    FetchWeather { epoch: Epoch, lat: f64, lon: f64 },
}
