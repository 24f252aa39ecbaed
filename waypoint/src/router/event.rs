//! Change notifications published by the router.

use std::fmt;

use crate::route::{AnyRoute, IdentityKey};

/// What a successful mutation did to the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A route was appended.
    Pushed { identity: IdentityKey },
    /// The top route was removed.
    Popped { identity: IdentityKey },
    /// The topmost route matching `identity` and everything above it were removed.
    PoppedTo { identity: IdentityKey, removed: usize },
    /// Every route was removed.
    PoppedToRoot { removed: usize },
    /// The top route was swapped for another in one step.
    Replaced {
        previous: Option<IdentityKey>,
        identity: IdentityKey,
    },
}

impl NavigationEvent {
    /// Number of routes this mutation took off the stack.
    pub fn removed(&self) -> usize {
        match self {
            NavigationEvent::Pushed { .. } => 0,
            NavigationEvent::Popped { .. } => 1,
            NavigationEvent::PoppedTo { removed, .. } => *removed,
            NavigationEvent::PoppedToRoot { removed } => *removed,
            NavigationEvent::Replaced { previous, .. } => usize::from(previous.is_some()),
        }
    }
}

/// Monotonic counter bumped once per successful mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Revision(u64);

impl Revision {
    pub fn get(&self) -> u64 {
        self.0
    }

    pub(crate) fn bump(&mut self) {
        self.0 += 1;
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Handle returned by [`Router::on_change`](super::Router::on_change).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A synchronous change listener. Receives the event and the stack as it
/// stands after the mutation.
pub type Listener = Box<dyn Fn(&NavigationEvent, &[AnyRoute]) + Send + Sync>;

/// Listeners in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn emit(&self, event: &NavigationEvent, routes: &[AnyRoute]) {
        for (_, listener) in &self.entries {
            listener(event, routes);
        }
    }
}
