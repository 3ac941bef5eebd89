use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{Component, LocationHeader, LocationHeaderProps, TempUnit};
use crate::action::Action;
use crate::state::{AppState, Location, Weather};

pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
    pub unit: TempUnit,
    pub spinner: &'static str,
}

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let view = BodyView::from_state(props.state);
        let lines = lines_for_view(&view, props.unit, props.spinner);
        let header = view.location();

        let mut constraints = Vec::with_capacity(lines.len() + 1);
        if header.is_some() {
            constraints.push(Constraint::Length(LocationHeader::HEIGHT));
        }
        constraints.extend(lines.iter().map(|_| Constraint::Length(1)));

        let chunks = Layout::vertical(constraints).flex(Flex::Center).split(area);
        let mut areas = chunks.iter().copied();

        if let Some(location) = header {
            if let Some(header_area) = areas.next() {
                LocationHeader.render(frame, header_area, LocationHeaderProps { location });
            }
        }

        for (line, area) in lines.into_iter().zip(areas) {
            frame.render_widget(Paragraph::new(line), area);
        }
    }
}

/// What the body shows, in order of precedence
enum BodyView<'a> {
    NeverRequested,
    Locating,
    LocationError(String),
    FetchingWeather(&'a Location),
    WeatherError(&'a Location, String),
    Ready(&'a Location, &'a Weather),
}

impl<'a> BodyView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        if !state.location.is_settled() {
            return if state.location.is_loading() {
                BodyView::Locating
            } else {
                BodyView::NeverRequested
            };
        }
        let Some(location) = state.location.ready() else {
            let error = state.location.error().map(ToString::to_string);
            return BodyView::LocationError(error.unwrap_or_default());
        };

        if !state.weather_matches_location() {
            // About to be requested by the coordinate watcher
            return BodyView::FetchingWeather(location);
        }
        if let Some(error) = state.weather.error() {
            BodyView::WeatherError(location, error.to_string())
        } else if let Some(weather) = state.weather.ready() {
            BodyView::Ready(location, weather)
        } else {
            BodyView::FetchingWeather(location)
        }
    }

    fn location(&self) -> Option<&'a Location> {
        match self {
            BodyView::FetchingWeather(location)
            | BodyView::WeatherError(location, _)
            | BodyView::Ready(location, _) => Some(*location),
            _ => None,
        }
    }
}

fn lines_for_view(
    view: &BodyView<'_>,
    unit: TempUnit,
    spinner: &'static str,
) -> Vec<Line<'static>> {
    match view {
        BodyView::NeverRequested => vec![
            blank_line(),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("r", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to fetch weather", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ],
        BodyView::Locating => vec![blank_line(), loading_line(spinner, "Locating")],
        BodyView::FetchingWeather(_) => {
            vec![blank_line(), loading_line(spinner, "Fetching weather")]
        }
        BodyView::LocationError(error) | BodyView::WeatherError(_, error) => {
            error_lines(error.clone())
        }
        BodyView::Ready(_, weather) => vec![
            blank_line(),
            Line::from(vec![Span::styled(
                format!("{} ({})", weather.status, weather.id),
                Style::default().fg(Color::Gray),
            )])
            .centered(),
            Line::from(vec![Span::styled(
                unit.format(weather.temp),
                Style::default().fg(temp_to_color(weather.temp)).bold(),
            )])
            .centered(),
            Line::from(vec![
                Span::styled("Wind ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:.1} m/s", weather.wind_speed),
                    Style::default().fg(Color::Gray),
                ),
            ])
            .centered(),
        ],
    }
}

fn loading_line(spinner: &'static str, label: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Cyan)),
        Span::styled(format!(" {}...", label), Style::default().fg(Color::Gray)),
    ])
    .centered()
}

fn error_lines(error: String) -> Vec<Line<'static>> {
    vec![
        blank_line(),
        Line::from(vec![Span::styled(
            "Error",
            Style::default().fg(Color::Red).bold(),
        )])
        .centered(),
        Line::from(vec![Span::styled(
            error,
            Style::default().fg(Color::Rgb(200, 100, 100)),
        )])
        .centered(),
        blank_line(),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("r", Style::default().fg(Color::Cyan).bold()),
            Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
        ])
        .centered(),
    ]
}

fn blank_line() -> Line<'static> {
    Line::from("")
}

/// Get temperature-based color
fn temp_to_color(celsius: f64) -> Color {
    match celsius.round() as i32 {
        ..=-10 => Color::Rgb(150, 200, 255),
        -9..=0 => Color::Rgb(100, 180, 255),
        1..=10 => Color::Rgb(100, 220, 200),
        11..=20 => Color::Rgb(150, 230, 150),
        21..=30 => Color::Rgb(255, 220, 100),
        31..=40 => Color::Rgb(255, 150, 80),
        _ => Color::Rgb(255, 100, 100),
    }
}
