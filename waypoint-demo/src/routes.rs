//! Routes shown by the demo.

use std::sync::Arc;

use ratatui::layout::Alignment;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use waypoint::{route_model, view_fn, AnyView, Route};

pub const HOME: &str = "home";
pub const SETTINGS: &str = "settings";

/// Who is using the app. Implementations need not be comparable.
pub trait Auth: Send + Sync {
    fn user(&self) -> Option<&str>;
}

pub struct Guest;

impl Auth for Guest {
    fn user(&self) -> Option<&str> {
        None
    }
}

pub struct SignedIn(pub String);

impl Auth for SignedIn {
    fn user(&self) -> Option<&str> {
        Some(&self.0)
    }
}

pub struct HomeRoute {
    pub auth: Arc<dyn Auth>,
}

#[route_model]
impl Route for HomeRoute {
    type Id = &'static str;
    type Destination = Paragraph<'static>;

    fn id(&self) -> &'static str {
        HOME
    }

    fn destination(&self) -> Paragraph<'static> {
        let greeting = match self.auth.user() {
            Some(user) => format!("Welcome back, {user}"),
            None => "Welcome, guest".to_string(),
        };
        Paragraph::new(vec![
            Line::from(greeting),
            Line::from(""),
            Line::from("Enter: open detail   s: settings   h: home"),
            Line::from("Backspace: back   r: back to home   c: clear   q: quit"),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().title("Home").borders(Borders::ALL))
    }
}

/// A numbered detail screen. Identified by its number.
pub struct DetailRoute {
    pub number: u32,
    pub notes: Vec<String>,
}

impl Route for DetailRoute {
    type Id = u32;
    type Destination = AnyView;

    fn id(&self) -> u32 {
        self.number
    }

    fn destination(&self) -> AnyView {
        let title = format!("Detail #{}", self.number);
        let body: Vec<Line<'static>> = self.notes.iter().cloned().map(Line::from).collect();
        Box::new(view_fn(move |frame, area| {
            let paragraph = Paragraph::new(body.clone())
                .block(Block::default().title(title.clone()).borders(Borders::ALL));
            frame.render_widget(paragraph, area);
        }))
    }
}

pub struct SettingsRoute;

impl Route for SettingsRoute {
    type Id = &'static str;
    type Destination = Paragraph<'static>;

    fn id(&self) -> &'static str {
        SETTINGS
    }

    fn destination(&self) -> Paragraph<'static> {
        Paragraph::new("Nothing to configure yet")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().title("Settings").borders(Borders::ALL))
    }
}
