//! Coordinate watcher: derives the weather request from a resolved location

use ipweather_core::Epoch;

use crate::action::{Action, request_weather};
use crate::state::AppState;

/// Requests weather once per resolved location
///
/// Registered with the runtime, it runs after every state change. It fires
/// when the location slice is `Ready` for an epoch it has not fired for,
/// so re-renders and weather outcomes never trigger a second request.
#[derive(Debug, Default)]
pub struct CoordinateWatcher {
    last_seen: Epoch,
}

impl CoordinateWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, state: &AppState) -> Option<Action> {
        let location = state.location.ready()?;
        let epoch = state.location.epoch();
        if epoch == self.last_seen {
            return None;
        }
        self.last_seen = epoch;

        if !location.lat.is_finite() || !location.lon.is_finite() {
            tracing::warn!(%epoch, "Resolved location has no usable coordinates");
            return None;
        }

        Some(request_weather(location.lat, location.lon))
    }
}
