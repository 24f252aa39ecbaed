//! Key-based lookup of shared values for nested rendering contexts.
//!
//! An [`Environment`] is handed down explicitly from parent to child
//! context. Values are looked up by key type; keys that were never set fall
//! back to [`EnvironmentKey::default_value`].
//!
//! [`RouterKey`] falls back to [`default_router`], a single process-wide
//! router created on first use and kept until the process exits. Every
//! context that reads `RouterKey` without an override mutates that same
//! router.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::state::SharedRouter;

/// A typed slot in an [`Environment`].
pub trait EnvironmentKey: 'static {
    type Value: Clone + Send + Sync + 'static;

    fn default_value() -> Self::Value;
}

/// Values visible to a rendering context.
///
/// Cloning is cheap and gives a child context its own overrides: a `set` on
/// the clone is not seen by the parent.
#[derive(Clone, Default)]
pub struct Environment {
    values: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value stored under `K`, or `K::default_value()`.
    pub fn get<K: EnvironmentKey>(&self) -> K::Value {
        self.values
            .get(&TypeId::of::<K>())
            .and_then(|value| value.downcast_ref::<K::Value>())
            .cloned()
            .unwrap_or_else(K::default_value)
    }

    /// Override `K` for this environment and its future clones.
    pub fn set<K: EnvironmentKey>(&mut self, value: K::Value) {
        self.values.insert(TypeId::of::<K>(), Arc::new(value));
    }

    /// Builder form of [`Environment::set`].
    pub fn with<K: EnvironmentKey>(mut self, value: K::Value) -> Self {
        self.set::<K>(value);
        self
    }

    /// Drop the override for `K`. Returns whether one existed.
    pub fn reset<K: EnvironmentKey>(&mut self) -> bool {
        self.values.remove(&TypeId::of::<K>()).is_some()
    }

    pub fn is_set<K: EnvironmentKey>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<K>())
    }

    /// Shorthand for `get::<RouterKey>()`.
    pub fn router(&self) -> SharedRouter {
        self.get::<RouterKey>()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("overrides", &self.values.len())
            .finish()
    }
}

/// The router a context navigates with.
pub struct RouterKey;

impl EnvironmentKey for RouterKey {
    type Value = SharedRouter;

    fn default_value() -> SharedRouter {
        default_router().clone()
    }
}

static DEFAULT_ROUTER: OnceLock<SharedRouter> = OnceLock::new();

/// The process-wide default router.
///
/// Initialized once on first call and never torn down before process exit.
/// It is shared by every context reading [`RouterKey`] without an override.
pub fn default_router() -> &'static SharedRouter {
    DEFAULT_ROUTER.get_or_init(|| {
        let router = SharedRouter::default();
        debug!(router = %router.id(), "initialized default router");
        router
    })
}
