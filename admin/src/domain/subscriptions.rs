//! Observer registry notified after every successful store mutation.
//!
//! # Invariants
//!
//! 1. Listeners run synchronously, in registration order.
//! 2. The listener list is captured when a publish starts: subscribing or
//!    unsubscribing from inside a listener only affects later publishes.
//! 3. [`Subscription::unsubscribe`] removes exactly one listener and is
//!    idempotent. Dropping the [`Subscription`] unsubscribes as well.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::domain::ids::{RoleId, UserId};
use crate::domain::state::StoreState;

/// Mutation that triggered a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A user was appended.
    UserCreated(UserId),
    /// A user was merged with a patch.
    UserUpdated(UserId),
    /// A user was removed.
    UserDeleted(UserId),
    /// A role was appended.
    RoleCreated(RoleId),
    /// A role was merged with a patch.
    RoleUpdated(RoleId),
    /// A role was removed.
    RoleDeleted(RoleId),
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserCreated(id) => write!(f, "user {id} created"),
            Self::UserUpdated(id) => write!(f, "user {id} updated"),
            Self::UserDeleted(id) => write!(f, "user {id} deleted"),
            Self::RoleCreated(id) => write!(f, "role {id} created"),
            Self::RoleUpdated(id) => write!(f, "role {id} updated"),
            Self::RoleDeleted(id) => write!(f, "role {id} deleted"),
        }
    }
}

type Listener = Rc<RefCell<dyn FnMut(&Change, StoreState<'_>)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Ordered set of listeners owned by the store.
#[derive(Default)]
pub struct SubscriptionBus {
    registry: Rc<RefCell<Registry>>,
}

impl SubscriptionBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` and return the capability that removes it.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&Change, StoreState<'_>) + 'static,
    {
        let entry: Listener = Rc::new(RefCell::new(listener));
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, entry));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Invoke every listener registered when the call starts.
    pub fn publish(&self, change: &Change, state: StoreState<'_>) {
        let listeners: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            let mut callback = listener.borrow_mut();
            (&mut *callback)(change, state);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Returns `true` when nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SubscriptionBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionBus")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Handle to one registered listener.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Remove the listener. Returns `true` only on the call that removed it.
    pub fn unsubscribe(&self) -> bool {
        let Some(shared) = self.registry.upgrade() else {
            return false;
        };
        let mut registry = shared.borrow_mut();
        let before = registry.listeners.len();
        registry.listeners.retain(|(id, _)| *id != self.id);
        registry.listeners.len() != before
    }

    /// Returns `true` while the listener is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry.upgrade().is_some_and(|registry| {
            registry
                .borrow()
                .listeners
                .iter()
                .any(|(id, _)| *id == self.id)
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
