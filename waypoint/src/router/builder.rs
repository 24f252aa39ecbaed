//! Builder for [`Router`].

use super::event::{Listener, NavigationEvent};
use super::history::Router;
use crate::route::{AnyRoute, Route};

/// Configures a [`Router`] before it starts publishing changes.
///
/// Seeded routes are placed on the stack bottom first without notifying
/// anyone; the revision of the built router starts at zero.
///
/// # Example
/// ```ignore
/// let router = Router::builder()
///     .route(HomeRoute::new(auth))
///     .on_change(|event, _| tracing::info!(?event, "navigation"))
///     .build();
/// ```
#[derive(Default)]
pub struct RouterBuilder {
    routes: Vec<AnyRoute>,
    listeners: Vec<Listener>,
}

impl RouterBuilder {
    /// Seed the stack with a route.
    pub fn route<R: Route>(mut self, route: R) -> Self {
        self.routes.push(AnyRoute::new(route));
        self
    }

    /// Seed the stack with an already erased route.
    pub fn any_route(mut self, route: AnyRoute) -> Self {
        self.routes.push(route);
        self
    }

    /// Register a change listener.
    pub fn on_change<F>(mut self, listener: F) -> Self
    where
        F: Fn(&NavigationEvent, &[AnyRoute]) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn build(self) -> Router {
        Router::from_parts(self.routes, self.listeners)
    }
}
