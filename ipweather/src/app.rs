//! Runtime wiring shared by `main` and the integration tests

use std::cell::RefCell;
use std::io;
use std::time::Duration;

use ipweather_core::{
    Component, EffectRuntime, EventKind, EventOutcome, LoggingMiddleware, Store,
};
use ratatui::{Frame, Terminal, backend::Backend, layout::Rect};

use crate::action::{Action, request_location};
use crate::components::{TempUnit, WeatherDisplay, WeatherDisplayProps};
use crate::config::Config;
use crate::effect::Effect;
use crate::orchestrator::Orchestrator;
use crate::reducer::reducer;
use crate::state::AppState;
use crate::watch::CoordinateWatcher;

/// Spinner animation period
pub const SPINNER_TICK_MS: u64 = 80;

pub type AppRuntime = EffectRuntime<AppState, Action, Effect, LoggingMiddleware>;

/// Store with logging middleware plus the coordinate watcher
pub fn build_runtime() -> AppRuntime {
    let store = Store::with_middleware(AppState::new(), reducer, LoggingMiddleware::new());
    let mut watcher = CoordinateWatcher::new();
    EffectRuntime::from_store(store).with_watcher(move |state: &AppState| watcher.observe(state))
}

/// View root: owns the component tree and its local state
pub struct WeatherUi {
    display: WeatherDisplay,
}

impl WeatherUi {
    pub fn new(unit: TempUnit) -> Self {
        Self {
            display: WeatherDisplay::new(unit),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let props = WeatherDisplayProps { state };
        self.display.render(frame, area, props);
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        let props = WeatherDisplayProps { state };
        let outcome = EventOutcome::from_actions(self.display.handle_event(event, props));

        match event {
            // Key presses may change view state (unit) without an action
            EventKind::Key(_) | EventKind::Resize(..) => outcome.with_render(),
            EventKind::Tick if state.is_loading() => outcome.with_render(),
            EventKind::Tick => outcome,
        }
    }
}

/// Run the terminal UI until the user quits
pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    orchestrator: Orchestrator,
    config: &Config,
) -> io::Result<()> {
    let mut runtime = build_runtime().with_tick(Duration::from_millis(SPINNER_TICK_MS));

    if let Some(period) = config.refresh_interval() {
        runtime
            .subscriptions()
            .interval("refresh", period, request_location);
    }

    runtime.enqueue(request_location());

    let unit = if config.fahrenheit {
        TempUnit::Fahrenheit
    } else {
        TempUnit::Celsius
    };
    let ui = RefCell::new(WeatherUi::new(unit));

    runtime
        .run(
            terminal,
            |frame, area, state| ui.borrow_mut().render(frame, area, state),
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| orchestrator.handle(effect, ctx),
        )
        .await
}
