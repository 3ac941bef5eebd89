//! Component trait for views rendered from the state tree

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A piece of UI that renders from props and answers events with actions
///
/// Props borrow what the component needs from the state tree. The component
/// never writes to that state; it returns actions instead. Purely visual
/// state (selected temperature unit, spinner frame) may live in `&mut self`
/// because no other part of the program needs to observe it.
///
/// # Example
///
/// ```ignore
/// struct Header;
///
/// struct HeaderProps<'a> {
///     location: Option<&'a Location>,
/// }
///
/// impl Component<Action> for Header {
///     type Props<'a> = HeaderProps<'a>;
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         let text = props.location.map(|l| l.city.as_str()).unwrap_or("Locating");
///         frame.render_widget(Paragraph::new(text), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Read-only data required to render
    type Props<'a>;

    /// Map an event to the actions it triggers
    ///
    /// Render-only components keep the default, which emits nothing.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Draw into `area`
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
