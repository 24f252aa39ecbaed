//! The route capability.

use std::fmt;
use std::hash::Hash;

use crate::view::View;

/// A navigable destination with a stable identity.
///
/// Only [`Route::id`] is inspected by the navigation stack, so a route may
/// carry collaborators that are neither comparable nor hashable (auth
/// handles, caches, display state).
///
/// # Example
/// ```ignore
/// use std::sync::Arc;
/// use waypoint::{route_model, Route};
///
/// struct ProfileRoute {
///     user: u64,
///     session: Arc<dyn Session>,
/// }
///
/// #[route_model]
/// impl Route for ProfileRoute {
///     type Id = u64;
///     type Destination = String;
///
///     fn id(&self) -> u64 {
///         self.user
///     }
///
///     fn destination(&self) -> String {
///         format!("Profile {}", self.user)
///     }
/// }
/// ```
pub trait Route: Send + Sync + 'static {
    /// The key that distinguishes this route from others.
    type Id: Hash + Eq + fmt::Debug + Clone + Send + Sync + 'static;

    /// What the host draws when this route is on top.
    type Destination: View;

    /// The identity of this route. Must not change for the value's lifetime.
    fn id(&self) -> Self::Id;

    /// Build the destination for this route.
    fn destination(&self) -> Self::Destination;
}
