//! The navigation stack.

use std::fmt;

use tokio::sync::watch;
use tracing::{debug, trace};

use super::builder::RouterBuilder;
use super::event::{Listener, ListenerId, Listeners, NavigationEvent, Revision};
use crate::error::{Result, RouteNotFoundSnafu};
use crate::route::{AnyRoute, IdentityKey, Route};

/// An ordered navigation history of type-erased routes.
///
/// The last route is the current screen. Identities need not be unique:
/// revisiting a screen pushes another entry with the same identity.
///
/// Every successful mutation bumps the [`Revision`] published on
/// [`Router::subscribe`] and then calls each [`Router::on_change`] listener
/// before returning. No-op pops and failed `pop_to` calls notify nobody.
///
/// The router takes `&mut self` for every mutation and holds no lock. Share
/// it across contexts or threads through [`SharedRouter`](crate::SharedRouter).
///
/// # Example
/// ```ignore
/// let mut router = Router::new();
/// router.navigate(HomeRoute::new(auth));
/// router.navigate(DetailRoute(1));
/// router.navigate(DetailRoute(2));
///
/// router.pop_to(&1u32)?;
/// assert_eq!(router.len(), 1);
/// ```
pub struct Router {
    stack: Vec<AnyRoute>,
    listeners: Listeners,
    revision: watch::Sender<Revision>,
}

impl Router {
    /// Create a router with an empty stack.
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }

    /// Start building a router with a seeded stack or pre-registered listeners.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    pub(crate) fn from_parts(stack: Vec<AnyRoute>, listeners: Vec<Listener>) -> Self {
        let (revision, _) = watch::channel(Revision::default());
        let mut registry = Listeners::default();
        for listener in listeners {
            registry.add(listener);
        }
        Self {
            stack,
            listeners: registry,
            revision,
        }
    }

    /// The whole stack, bottom first.
    pub fn routes(&self) -> &[AnyRoute] {
        &self.stack
    }

    /// The topmost route, if any.
    pub fn current(&self) -> Option<&AnyRoute> {
        self.stack.last()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Whether [`Router::pop`] would remove anything.
    pub fn can_go_back(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Index of the topmost route identified by `identity`.
    pub fn position_of<K>(&self, identity: &K) -> Option<usize>
    where
        K: PartialEq + 'static,
    {
        self.stack
            .iter()
            .rposition(|route| route.is_identified_by(identity))
    }

    pub fn contains<K>(&self, identity: &K) -> bool
    where
        K: PartialEq + 'static,
    {
        self.position_of(identity).is_some()
    }

    /// Current revision. Starts at zero.
    pub fn revision(&self) -> Revision {
        *self.revision.borrow()
    }

    /// Watch for mutations. The receiver sees the latest [`Revision`].
    pub fn subscribe(&self) -> watch::Receiver<Revision> {
        self.revision.subscribe()
    }

    /// Register a listener called synchronously after each successful mutation.
    pub fn on_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&NavigationEvent, &[AnyRoute]) + Send + Sync + 'static,
    {
        self.listeners.add(Box::new(listener))
    }

    /// Unregister a listener. Returns false if it was already gone.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Push a route on top of the stack.
    pub fn navigate<R: Route>(&mut self, route: R) {
        let route = AnyRoute::new(route);
        let identity = route.identity().clone();
        debug!(%identity, route = route.type_name(), depth = self.stack.len() + 1, "navigate");
        self.stack.push(route);
        self.notify(NavigationEvent::Pushed { identity });
    }

    /// Remove the top route. Does nothing on an empty stack.
    pub fn pop(&mut self) -> Option<AnyRoute> {
        let Some(route) = self.stack.pop() else {
            trace!("pop on empty stack");
            return None;
        };
        debug!(identity = %route.identity(), depth = self.stack.len(), "pop");
        self.notify(NavigationEvent::Popped {
            identity: route.identity().clone(),
        });
        Some(route)
    }

    /// Remove the topmost route identified by `identity` and every route above it.
    ///
    /// The search runs from the top down, so when an identity occurs more than
    /// once the most recent occurrence wins. The matched route is removed too:
    /// afterwards the route that sat directly below it is on top. The removed
    /// routes are returned bottom first.
    ///
    /// Fails with [`Error::RouteNotFound`](crate::Error::RouteNotFound) when no
    /// route matches, leaving the stack untouched.
    pub fn pop_to<K>(&mut self, identity: &K) -> Result<Vec<AnyRoute>>
    where
        K: PartialEq + fmt::Debug + 'static,
    {
        match self.position_of(identity) {
            Some(index) => Ok(self.truncate_at(index)),
            None => {
                debug!(identity = ?identity, depth = self.stack.len(), "pop_to: no matching route");
                RouteNotFoundSnafu {
                    identity: format!("{identity:?}"),
                }
                .fail()
            }
        }
    }

    /// [`Router::pop_to`] keyed by another route's identity.
    pub fn pop_to_route(&mut self, route: &AnyRoute) -> Result<Vec<AnyRoute>> {
        self.pop_to_identity(route.identity())
    }

    /// [`Router::pop_to`] keyed by an already erased identity.
    pub fn pop_to_identity(&mut self, identity: &IdentityKey) -> Result<Vec<AnyRoute>> {
        match self.stack.iter().rposition(|route| route.identity() == identity) {
            Some(index) => Ok(self.truncate_at(index)),
            None => {
                debug!(%identity, depth = self.stack.len(), "pop_to: no matching route");
                RouteNotFoundSnafu {
                    identity: identity.to_string(),
                }
                .fail()
            }
        }
    }

    /// Remove every route. Notifies only if the stack was not already empty.
    pub fn pop_to_root(&mut self) -> Vec<AnyRoute> {
        if self.stack.is_empty() {
            trace!("pop_to_root on empty stack");
            return Vec::new();
        }
        let removed = std::mem::take(&mut self.stack);
        debug!(removed = removed.len(), "pop_to_root");
        self.notify(NavigationEvent::PoppedToRoot {
            removed: removed.len(),
        });
        removed
    }

    /// Swap the top route for `route` with a single notification. On an empty
    /// stack this is a push.
    pub fn replace<R: Route>(&mut self, route: R) -> Option<AnyRoute> {
        let route = AnyRoute::new(route);
        let identity = route.identity().clone();
        let previous = self.stack.pop();
        debug!(
            %identity,
            previous = ?previous.as_ref().map(AnyRoute::identity),
            "replace"
        );
        self.stack.push(route);
        self.notify(NavigationEvent::Replaced {
            previous: previous.as_ref().map(|route| route.identity().clone()),
            identity,
        });
        previous
    }

    fn truncate_at(&mut self, index: usize) -> Vec<AnyRoute> {
        let removed = self.stack.split_off(index);
        let identity = removed[0].identity().clone();
        debug!(%identity, removed = removed.len(), depth = self.stack.len(), "pop_to");
        self.notify(NavigationEvent::PoppedTo {
            identity,
            removed: removed.len(),
        });
        removed
    }

    fn notify(&self, event: NavigationEvent) {
        self.revision.send_modify(Revision::bump);
        self.listeners.emit(&event, &self.stack);
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("stack", &self.stack)
            .field("listeners", &self.listeners.len())
            .field("revision", &self.revision())
            .finish()
    }
}
