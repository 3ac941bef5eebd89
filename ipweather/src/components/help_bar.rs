use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{Component, TempUnit};
use crate::action::Action;

pub struct HelpBar;

pub struct HelpBarProps {
    /// Unit currently shown; `u` switches to the other one
    pub unit: TempUnit,
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let key = Style::default().fg(Color::Cyan).bold();
        let label = Style::default().fg(Color::DarkGray);

        let help = Line::from(vec![
            Span::styled(" r", key),
            Span::styled(" refresh  ", label),
            Span::styled("u", key),
            Span::styled(format!(" {}  ", props.unit.toggle().symbol()), label),
            Span::styled("q", key),
            Span::styled(" quit ", label),
        ])
        .centered();
        frame.render_widget(Paragraph::new(help), area);
    }
}
