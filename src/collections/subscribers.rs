//! Callback registry shared by the observable collections and graphs.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(0);

/// Identifies a registered handler so that it can be removed again.
///
/// Ids are unique across the process, so an id taken from one registry never matches a
/// handler of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription#{}", self.0)
    }
}

/// An ordered list of boxed handlers. Handlers run in registration order.
pub(crate) struct Subscribers<H: ?Sized> {
    handlers: Vec<(SubscriptionId, Box<H>)>,
}

impl<H: ?Sized> Subscribers<H> {
    pub(crate) fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, handler: Box<H>) -> SubscriptionId {
        let id = SubscriptionId(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed));
        self.handlers.push((id, handler));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Calls `f` once per handler, in registration order.
    pub(crate) fn for_each(&mut self, mut f: impl FnMut(&mut H)) {
        for (_, handler) in &mut self.handlers {
            f(&mut **handler);
        }
    }
}

impl<H: ?Sized> Default for Subscribers<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> fmt::Debug for Subscribers<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.handlers.len())
            .finish()
    }
}
