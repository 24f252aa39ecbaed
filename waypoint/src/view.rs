//! Renderable destinations.
//!
//! A route hands back a [`View`] describing what to draw. The stack never
//! looks inside it; only the host calls [`View::render`].

use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// A destination descriptor that can draw itself into an area of the frame.
pub trait View: Send + Sync + 'static {
    fn render(&self, frame: &mut Frame, area: Rect);
}

/// A boxed, type-erased destination.
pub type AnyView = Box<dyn View>;

impl View for AnyView {
    fn render(&self, frame: &mut Frame, area: Rect) {
        (**self).render(frame, area);
    }
}

impl View for &'static str {
    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(*self), area);
    }
}

impl View for String {
    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.as_str()), area);
    }
}

impl View for Paragraph<'static> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.clone(), area);
    }
}

/// A view backed by a drawing closure. Build one with [`view_fn`].
pub struct ViewFn<F>(F);

/// Wrap a closure as a [`View`].
///
/// ```ignore
/// let banner = view_fn(|frame, area| {
///     frame.render_widget(Paragraph::new("Welcome"), area);
/// });
/// ```
pub fn view_fn<F>(draw: F) -> ViewFn<F>
where
    F: Fn(&mut Frame, Rect) + Send + Sync + 'static,
{
    ViewFn(draw)
}

impl<F> View for ViewFn<F>
where
    F: Fn(&mut Frame, Rect) + Send + Sync + 'static,
{
    fn render(&self, frame: &mut Frame, area: Rect) {
        (self.0)(frame, area);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    /// Render a view into a single-line test terminal and return the line.
    pub(crate) fn render_line(view: &dyn View, width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 1)).expect("test terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area);
            })
            .expect("draw");
        let buffer = terminal.backend().buffer();
        (0..width).map(|x| buffer[(x, 0)].symbol()).collect()
    }

    #[test]
    fn test_str_view_renders_text() {
        assert_eq!(render_line(&"Home", 6), "Home  ");
    }

    #[test]
    fn test_boxed_view_delegates() {
        let view: AnyView = Box::new(String::from("Settings"));
        assert_eq!(render_line(&view, 8), "Settings");
    }

    #[test]
    fn test_view_fn_draws_through_closure() {
        let view = view_fn(|frame, area| {
            frame.render_widget(Paragraph::new("drawn"), area);
        });
        assert_eq!(render_line(&view, 5), "drawn");
    }
}
