//! Shared router handles.
//!
//! A [`Router`] is single-writer and lock-free. [`SharedRouter`] is the
//! serialization point for sharing one router between rendering contexts,
//! tasks or threads.

use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use tokio::sync::watch;
use tracing::warn;

use crate::error::{Error, Result};
use crate::route::{AnyRoute, Route};
use crate::router::{Revision, Router};

/// Global counter for generating unique router IDs.
static NEXT_ROUTER_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one shared router for the lifetime of the process.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouterId(NonZeroU64);

impl RouterId {
    fn next() -> Self {
        let id = NEXT_ROUTER_ID.fetch_add(1, Ordering::Relaxed);
        Self(NonZeroU64::new(id).unwrap_or_else(|| panic!("RouterId overflow")))
    }

    pub fn as_u64(&self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Debug for RouterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RouterId({})", self.0)
    }
}

impl std::fmt::Display for RouterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cloneable handle to one router behind a read-write lock.
///
/// [`SharedRouter::update`] takes the write lock, so mutations from
/// different holders are serialized. Router listeners run while that lock is
/// held and must not call back into the same handle.
pub struct SharedRouter {
    id: RouterId,
    inner: Arc<RwLock<Router>>,
    revision: watch::Receiver<Revision>,
}

/// A weak handle to a shared router, for listeners and tasks that must not
/// keep it alive.
pub struct WeakRouter {
    id: RouterId,
    inner: Weak<RwLock<Router>>,
    revision: watch::Receiver<Revision>,
}

impl SharedRouter {
    pub fn new(router: Router) -> Self {
        let revision = router.subscribe();
        Self {
            id: RouterId::next(),
            inner: Arc::new(RwLock::new(router)),
            revision,
        }
    }

    pub fn id(&self) -> RouterId {
        self.id
    }

    /// Mutate the router under the write lock.
    pub fn update<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Router) -> R,
    {
        let mut guard = self.inner.write().map_err(|_| {
            warn!(router = %self.id, "router lock poisoned on write");
            Error::LockPoisoned
        })?;
        Ok(f(&mut *guard))
    }

    /// Read the router under the read lock.
    pub fn read<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Router) -> R,
    {
        let guard = self.inner.read().map_err(|_| {
            warn!(router = %self.id, "router lock poisoned on read");
            Error::LockPoisoned
        })?;
        Ok(f(&*guard))
    }

    pub fn navigate<R: Route>(&self, route: R) -> Result<()> {
        self.update(|router| router.navigate(route))
    }

    pub fn pop(&self) -> Result<Option<AnyRoute>> {
        self.update(Router::pop)
    }

    pub fn pop_to<K>(&self, identity: &K) -> Result<Vec<AnyRoute>>
    where
        K: PartialEq + std::fmt::Debug + 'static,
    {
        self.update(|router| router.pop_to(identity))?
    }

    /// Clone of the current stack, bottom first.
    pub fn snapshot(&self) -> Result<Vec<AnyRoute>> {
        self.read(|router| router.routes().to_vec())
    }

    /// Watch for mutations made through any holder of this router.
    pub fn subscribe(&self) -> watch::Receiver<Revision> {
        self.revision.clone()
    }

    pub fn downgrade(&self) -> WeakRouter {
        WeakRouter {
            id: self.id,
            inner: Arc::downgrade(&self.inner),
            revision: self.revision.clone(),
        }
    }

    /// Whether both handles point at the same router.
    pub fn ptr_eq(&self, other: &SharedRouter) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl WeakRouter {
    pub fn id(&self) -> RouterId {
        self.id
    }

    /// Upgrade to a strong handle if the router is still alive.
    pub fn upgrade(&self) -> Option<SharedRouter> {
        self.inner.upgrade().map(|inner| SharedRouter {
            id: self.id,
            inner,
            revision: self.revision.clone(),
        })
    }

    /// Mutate the router if it is still alive.
    pub fn update<F, R>(&self, f: F) -> Option<Result<R>>
    where
        F: FnOnce(&mut Router) -> R,
    {
        self.upgrade().map(|router| router.update(f))
    }
}

impl Clone for SharedRouter {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            revision: self.revision.clone(),
        }
    }
}

impl Clone for WeakRouter {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Weak::clone(&self.inner),
            revision: self.revision.clone(),
        }
    }
}

impl Default for SharedRouter {
    fn default() -> Self {
        Self::new(Router::new())
    }
}

impl std::fmt::Debug for SharedRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRouter").field("id", &self.id).finish()
    }
}
