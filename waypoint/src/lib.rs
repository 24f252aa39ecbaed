//! In-memory navigation history for client applications.
//!
//! Routes of unrelated types share one stack as [`AnyRoute`]s, compared and
//! hashed by identity alone. The [`Router`] pushes, pops and pops back to an
//! identity, and tells the rendering layer about each change.

pub mod environment;
pub mod error;
pub mod route;
pub mod router;
pub mod state;
pub mod view;

pub use error::{Error, Result};

// Re-export common types for convenience
pub use environment::{default_router, Environment, EnvironmentKey, RouterKey};
pub use route::{AnyRoute, IdentityKey, Route};
pub use router::{ListenerId, NavigationEvent, Revision, Router, RouterBuilder};
pub use state::{RouterId, SharedRouter, WeakRouter};
pub use view::{view_fn, AnyView, View, ViewFn};
pub use waypoint_macros::route_model;
