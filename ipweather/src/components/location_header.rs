use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::Location;

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub location: &'a Location,
}

impl LocationHeader {
    pub const HEIGHT: u16 = 2;
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

        let location_line = Line::from(vec![Span::styled(
            format!("{}, {}", props.location.city, props.location.country),
            Style::default().fg(Color::White).bold(),
        )])
        .centered();
        frame.render_widget(Paragraph::new(location_line), chunks[0]);

        let coords_line = Line::from(vec![Span::styled(
            format_coordinates(props.location.lat, props.location.lon),
            Style::default().fg(Color::DarkGray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(coords_line), chunks[1]);
    }
}

/// `51.50°N, 0.12°W`
pub fn format_coordinates(lat: f64, lon: f64) -> String {
    let ns = if lat < 0.0 { 'S' } else { 'N' };
    let ew = if lon < 0.0 { 'W' } else { 'E' };
    format!("{:.2}°{}, {:.2}°{}", lat.abs(), ns, lon.abs(), ew)
}
