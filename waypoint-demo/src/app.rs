//! Terminal host: reads keys, mutates the router, renders the stack.

use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use tracing::{debug, info};
use waypoint::{AnyRoute, Environment, SharedRouter, View};

use crate::routes::{Auth, DetailRoute, HomeRoute, SettingsRoute, HOME};

/// Whether the loop keeps going after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    router: SharedRouter,
    auth: Arc<dyn Auth>,
    next_detail: u32,
    status: String,
}

impl App {
    /// Create the app, navigating with whatever router `env` provides.
    pub fn new(env: &Environment, auth: Arc<dyn Auth>) -> Self {
        Self {
            router: env.router(),
            auth,
            next_detail: 1,
            status: String::from("Ready"),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Apply one key press to the router.
    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<Flow> {
        match key.code {
            KeyCode::Char('q') => return Ok(Flow::Quit),
            KeyCode::Enter => {
                let number = self.next_detail;
                self.next_detail += 1;
                self.router.navigate(DetailRoute {
                    number,
                    notes: vec![format!("Opened as detail {number}")],
                })?;
                self.status = format!("Opened detail {number}");
            }
            KeyCode::Char('h') => {
                self.router.navigate(HomeRoute {
                    auth: Arc::clone(&self.auth),
                })?;
                self.status = String::from("Opened home");
            }
            KeyCode::Char('s') => {
                self.router.navigate(SettingsRoute)?;
                self.status = String::from("Opened settings");
            }
            KeyCode::Backspace | KeyCode::Esc => {
                self.status = match self.router.pop()? {
                    Some(route) => format!("Closed {}", route.identity()),
                    None => String::from("Nothing to go back to"),
                };
            }
            KeyCode::Char('r') => {
                self.status = match self.router.pop_to(&HOME) {
                    Ok(removed) => format!("Went back past home, closed {}", removed.len()),
                    Err(err) if err.is_not_found() => err.to_string(),
                    Err(err) => return Err(err.into()),
                };
            }
            KeyCode::Char('c') => {
                let removed = self.router.update(|router| router.pop_to_root())?;
                self.status = format!("Cleared {} routes", removed.len());
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    /// Draw the breadcrumb, the top destination and the status line.
    pub fn render(&self, frame: &mut Frame, routes: &[AnyRoute]) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let trail = routes
            .iter()
            .map(|route| route.identity().to_string())
            .collect::<Vec<_>>()
            .join(" > ");
        let breadcrumb = Paragraph::new(trail)
            .block(Block::default().title("Stack").borders(Borders::ALL));
        frame.render_widget(breadcrumb, chunks[0]);

        match routes.last() {
            Some(route) => route.destination().render(frame, chunks[1]),
            None => {
                let empty = Paragraph::new("Empty stack. Press h for home or Enter for a detail.")
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(empty, chunks[1]);
            }
        }

        frame.render_widget(Paragraph::new(self.status()), chunks[2]);
    }

    /// Run until `q` is pressed.
    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_app_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut revisions = self.router.subscribe();
        self.draw(terminal)?;

        loop {
            tokio::select! {
                changed = revisions.changed() => {
                    changed?;
                    let revision = *revisions.borrow_and_update();
                    debug!(%revision, "router changed, redrawing");
                    self.draw(terminal)?;
                }
                event_ready = async { event::poll(Duration::from_millis(100)) } => {
                    if !event_ready? {
                        continue;
                    }
                    if let CrosstermEvent::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if self.handle_key(key)? == Flow::Quit {
                            info!("quit requested");
                            return Ok(());
                        }
                        // Status may change without a router mutation.
                        self.draw(terminal)?;
                    }
                }
            }
        }
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
        let routes = self.router.snapshot()?;
        terminal.draw(|frame| self.render(frame, &routes))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{Guest, SignedIn};
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use waypoint::{Router, RouterKey};

    fn app() -> (App, SharedRouter) {
        let router = SharedRouter::new(Router::new());
        let env = Environment::new().with::<RouterKey>(router.clone());
        (App::new(&env, Arc::new(Guest)), router)
    }

    fn press(app: &mut App, code: KeyCode) -> Flow {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn screen(app: &App, router: &SharedRouter) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let routes = router.snapshot().unwrap();
        terminal.draw(|frame| app.render(frame, &routes)).unwrap();
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_keys_drive_the_stack() {
        let (mut app, router) = app();

        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(router.read(Router::len).unwrap(), 4);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.status(), "Closed \"settings\"");

        press(&mut app, KeyCode::Char('r'));
        assert!(router.read(Router::is_empty).unwrap());
        assert_eq!(app.status(), "Went back past home, closed 3");
    }

    #[test]
    fn test_back_to_home_without_home_reports_not_found() {
        let (mut app, router) = app();
        press(&mut app, KeyCode::Enter);

        assert_eq!(press(&mut app, KeyCode::Char('r')), Flow::Continue);
        assert_eq!(router.read(Router::len).unwrap(), 1);
        assert!(app.status().contains("No route identified by \"home\""));
    }

    #[test]
    fn test_pop_on_empty_and_quit() {
        let (mut app, _router) = app();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.status(), "Nothing to go back to");
        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Quit);
    }

    #[test]
    fn test_render_shows_breadcrumb_and_top_destination() {
        let router = SharedRouter::new(Router::new());
        let env = Environment::new().with::<RouterKey>(router.clone());
        let mut app = App::new(&env, Arc::new(SignedIn("ada".to_string())));

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('h'));

        let screen = screen(&app, &router);
        assert!(screen.contains("1 > \"home\""));
        assert!(screen.contains("Welcome back, ada"));
        assert!(screen.contains("Opened home"));
    }

    #[test]
    fn test_render_empty_stack() {
        let (app, router) = app();
        let screen = screen(&app, &router);
        assert!(screen.contains("Empty stack."));
    }
}
