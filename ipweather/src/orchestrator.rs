//! Effect orchestrator: turns effects into fetch tasks
//!
//! Each effect kind spawns one task under its slice's key. Spawning under a
//! key aborts whatever is still running there, and the outcome carries the
//! epoch the reducer handed out, so only the latest request can land.

use std::sync::Arc;

use ipweather_core::EffectContext;
use tracing::{info, warn};

use crate::action::{Action, Outcome};
use crate::api::WeatherApi;
use crate::effect::Effect;

pub const LOCATION_TASK: &str = "location";
pub const WEATHER_TASK: &str = "weather";

#[derive(Debug, Clone)]
pub struct Orchestrator {
    api: Arc<WeatherApi>,
}

impl Orchestrator {
    pub fn new(api: WeatherApi) -> Self {
        Self { api: Arc::new(api) }
    }

    /// Spawn the task for one effect
    pub fn handle(&self, effect: Effect, ctx: &mut EffectContext<'_, Action>) {
        match effect {
            Effect::FetchLocation { epoch } => {
                let api = Arc::clone(&self.api);
                info!(%epoch, "Fetching location");
                ctx.tasks().spawn(LOCATION_TASK, async move {
                    let outcome = match api.fetch_location().await {
                        Ok(location) => Outcome::LocationSucceeded { epoch, location },
                        Err(error) => {
                            warn!(%epoch, %error, "Location fetch failed");
                            Outcome::LocationFailed { epoch, error }
                        }
                    };
                    Action::Outcome(outcome)
                });
            }
            Effect::FetchWeather { epoch, lat, lon } => {
                let api = Arc::clone(&self.api);
                info!(%epoch, lat, lon, "Fetching weather");
                ctx.tasks().spawn(WEATHER_TASK, async move {
                    let outcome = match api.fetch_weather(lat, lon).await {
                        Ok(weather) => Outcome::WeatherSucceeded { epoch, weather },
                        Err(error) => {
                            warn!(%epoch, %error, "Weather fetch failed");
                            Outcome::WeatherFailed { epoch, error }
                        }
                    };
                    Action::Outcome(outcome)
                });
            }
        }
    }
}
