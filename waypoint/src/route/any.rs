//! The type-erased route stored in the navigation stack.

use std::any::{self, Any};
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use super::identity::IdentityKey;
use super::traits::Route;
use crate::view::AnyView;

type DestinationFn = dyn Fn() -> AnyView + Send + Sync;

/// A [`Route`] with its concrete type erased.
///
/// Everything is captured when the wrapper is built: the identity is read
/// once, the route value is moved behind an `Arc`, and the destination
/// accessor closes over that `Arc`. Equality and hashing look at the
/// identity and nothing else, so two wrappers with the same identity are
/// equal however different their destinations or auxiliary data.
#[derive(Clone)]
pub struct AnyRoute {
    identity: IdentityKey,
    route: Arc<dyn Any + Send + Sync>,
    destination: Arc<DestinationFn>,
    type_name: &'static str,
}

impl AnyRoute {
    /// Wrap a concrete route.
    pub fn new<R: Route>(route: R) -> Self {
        let identity = IdentityKey::new(route.id());
        let route = Arc::new(route);
        let destination: Arc<DestinationFn> = {
            let route = Arc::clone(&route);
            Arc::new(move || Box::new(route.destination()) as AnyView)
        };

        Self {
            identity,
            route,
            destination,
            type_name: any::type_name::<R>(),
        }
    }

    /// The identity captured at wrap time.
    pub fn identity(&self) -> &IdentityKey {
        &self.identity
    }

    /// Build the destination of the wrapped route.
    pub fn destination(&self) -> AnyView {
        (self.destination)()
    }

    /// Hash of the identity alone, using the standard library's default hasher.
    pub fn identity_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.identity.hash(&mut hasher);
        hasher.finish()
    }

    /// Full equality test against a raw key.
    pub fn is_identified_by<K>(&self, key: &K) -> bool
    where
        K: PartialEq + 'static,
    {
        self.identity.matches(key)
    }

    /// Borrow the wrapped route if it is an `R`.
    pub fn route<R: Route>(&self) -> Option<&R> {
        self.route.downcast_ref::<R>()
    }

    /// Whether the wrapped route is an `R`.
    pub fn is<R: Route>(&self) -> bool {
        self.route.is::<R>()
    }

    /// Name of the concrete route type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for AnyRoute {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for AnyRoute {}

impl Hash for AnyRoute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Debug for AnyRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyRoute")
            .field("type", &self.type_name)
            .field("identity", &self.identity)
            .finish()
    }
}
