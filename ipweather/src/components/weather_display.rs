//! Top-level weather component
//!
//! Props borrow the state tree. The temperature unit and the spinner frame
//! are view state: they change on key presses and ticks without going
//! through the store.

use crossterm::event::KeyCode;
use ipweather_core::EventKind;
use ratatui::prelude::{Frame, Rect};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders},
};

use super::{Component, HelpBar, HelpBarProps, WeatherBody, WeatherBodyProps};
use crate::action::{Action, request_location};
use crate::state::AppState;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Temperature unit preference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TempUnit::Celsius => "°C",
            TempUnit::Fahrenheit => "°F",
        }
    }

    /// Format a Celsius reading in this unit with one decimal
    pub fn format(self, celsius: f64) -> String {
        let value = match self {
            TempUnit::Celsius => celsius,
            TempUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        };
        format!("{:.1}{}", value, self.symbol())
    }
}

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
}

/// The main weather display component
#[derive(Debug, Default)]
pub struct WeatherDisplay {
    unit: TempUnit,
    tick: usize,
}

impl WeatherDisplay {
    pub fn new(unit: TempUnit) -> Self {
        Self { unit, tick: 0 }
    }

    pub fn unit(&self) -> TempUnit {
        self.unit
    }

    fn spinner(&self) -> &'static str {
        SPINNERS[(self.tick / 2) % SPINNERS.len()]
    }
}

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => vec![request_location()],
                KeyCode::Char('u') => {
                    self.unit = self.unit.toggle();
                    vec![]
                }
                KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
                _ => vec![],
            },
            EventKind::Tick => {
                if props.state.is_loading() {
                    self.tick = self.tick.wrapping_add(1);
                }
                vec![]
            }
            EventKind::Resize(..) => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let state = props.state;

        let loading_indicator = if state.is_loading() {
            format!(" {} ", self.spinner())
        } else {
            String::new()
        };

        let outer_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" ipweather{}", loading_indicator))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);

        frame.render_widget(outer_block.clone(), area);
        let inner = outer_block.inner(area);

        let chunks = Layout::vertical([
            Constraint::Min(1),    // Body, centered by WeatherBody
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

        let mut body = WeatherBody;
        body.render(
            frame,
            chunks[0],
            WeatherBodyProps {
                state,
                unit: self.unit,
                spinner: self.spinner(),
            },
        );

        let mut help = HelpBar;
        help.render(frame, chunks[1], HelpBarProps { unit: self.unit });
    }
}
