//! Router module.
//!
//! Provides the navigation stack [`Router`], its [`RouterBuilder`] and the
//! change notifications it publishes.

pub mod builder;
pub mod event;
pub mod history;

pub use builder::RouterBuilder;
pub use event::{Listener, ListenerId, NavigationEvent, Revision};
pub use history::Router;
