//! A [`Set`] that reports every change to registered handlers.

use super::{MutableSet, Set};
use crate::collections::subscribers::{SubscriptionId, Subscribers};
use core::convert::Infallible;
use core::fmt;
use core::hash::Hash;
use std::collections::hash_set;

/// Items added to and removed from an [`ObservableSet`] by one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetChanged<T> {
    /// Items that became members.
    pub added: Vec<T>,
    /// Items that stopped being members.
    pub removed: Vec<T>,
}

type Handler<T> = dyn FnMut(&SetChanged<T>);

/// A hash set that raises a [`SetChanged`] event whenever its membership changes.
///
/// Single adds and removes raise one event each, and only when they changed the set.
/// `clear` raises a single event listing every removed item, after the set is empty.
pub struct ObservableSet<T> {
    items: Set<T>,
    handlers: Subscribers<Handler<T>>,
}

impl<T: Eq + Hash + Clone> ObservableSet<T> {
    /// Creates an empty set with no handlers.
    pub fn new() -> Self {
        Self {
            items: Set::new(),
            handlers: Subscribers::new(),
        }
    }

    /// Registers `handler` to run after every change.
    pub fn on_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&SetChanged<T>) + 'static,
    {
        self.handlers.subscribe(Box::new(handler))
    }

    /// Removes a handler. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.handlers.unsubscribe(id)
    }

    /// Returns the number of registered handlers.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Returns the underlying set.
    pub fn as_set(&self) -> &Set<T> {
        &self.items
    }

    fn raise(&mut self, event: &SetChanged<T>) {
        if self.handlers.is_empty() {
            return;
        }
        tracing::trace!(
            added = event.added.len(),
            removed = event.removed.len(),
            "set changed"
        );
        self.handlers.for_each(|handler| handler(event));
    }
}

impl<T: Eq + Hash + Clone> MutableSet<T> for ObservableSet<T> {
    type Error = Infallible;
    type Iter<'a> = hash_set::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn add(&mut self, item: T) -> Result<bool, Infallible> {
        if !self.items.insert(item.clone()) {
            return Ok(false);
        }
        self.raise(&SetChanged {
            added: vec![item],
            removed: Vec::new(),
        });
        Ok(true)
    }

    fn remove(&mut self, item: &T) -> Result<bool, Infallible> {
        if !self.items.remove(item) {
            return Ok(false);
        }
        self.raise(&SetChanged {
            added: Vec::new(),
            removed: vec![item.clone()],
        });
        Ok(true)
    }

    fn contains(&self, item: &T) -> Result<bool, Infallible> {
        Ok(self.items.contains(item))
    }

    fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let removed: Vec<T> = self.items.iter().cloned().collect();
        self.items.clear();
        self.raise(&SetChanged {
            added: Vec::new(),
            removed,
        });
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.items.iter()
    }
}

impl<T: Eq + Hash + Clone> Default for ObservableSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableSet")
            .field("items", &self.items)
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded(set: &mut ObservableSet<i32>) -> Rc<RefCell<Vec<SetChanged<i32>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        set.on_changed(move |e| sink.borrow_mut().push(e.clone()));
        log
    }

    #[test]
    fn test_add_and_remove_raise_only_on_change() {
        let mut set = ObservableSet::new();
        let log = recorded(&mut set);

        assert_eq!(set.add(1), Ok(true));
        assert_eq!(set.add(1), Ok(false));
        assert_eq!(set.remove(&2), Ok(false));
        assert_eq!(set.remove(&1), Ok(true));

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].added, vec![1]);
        assert!(log[0].removed.is_empty());
        assert_eq!(log[1].removed, vec![1]);
    }

    #[test]
    fn test_clear_raises_once() {
        let mut set = ObservableSet::new();
        set.union_with([1, 2, 3]).unwrap();
        let log = recorded(&mut set);

        set.clear();
        set.clear();

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        let mut removed = log[0].removed.clone();
        removed.sort_unstable();
        assert_eq!(removed, vec![1, 2, 3]);
        assert!(set.is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_events() {
        let mut set = ObservableSet::new();
        let log = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&log);
        let id = set.on_changed(move |_| *sink.borrow_mut() += 1);
        set.add(5).unwrap();
        assert!(set.unsubscribe(id));
        assert_eq!(set.subscriber_count(), 0);
        set.add(6).unwrap();
        assert_eq!(*log.borrow(), 1);
    }
}
