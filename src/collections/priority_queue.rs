//! `PriorityQueue` - a stable min-priority queue ordered by a user comparer.
//!
//! Values leave the queue in ascending priority order; values with equal priority leave
//! in the order they were enqueued. The queue is a binary heap whose entries carry an
//! insertion sequence number, so every comparison is a total order over
//! `(priority, sequence)` and ties never depend on heap layout.
//!
//! # Performance
//! - `enqueue`: O(log n) amortized
//! - `dequeue`: O(log n)
//! - `peek`: O(1)
//! - `iter` / `cursor`: O(n log n) to establish dequeue order
//!
//! Every structural change (`enqueue`, `dequeue`, `clear`) bumps a version stamp.
//! Borrowing iterators cannot observe a change, but detached [`Cursor`]s can, and they
//! fail with [`Error::ConcurrentModification`] instead of yielding stale values.

use crate::collections::compare::{Compare, NaturalOrder};
use crate::error::{Error, Result};
use core::cmp::Ordering;
use core::fmt;
use core::sync::atomic::{self, AtomicU64};

const NAME: &str = "priority queue";

static NEXT_QUEUE_ID: AtomicU64 = AtomicU64::new(0);

struct Entry<P, V> {
    priority: P,
    seq: u64,
    value: V,
}

/// A min-priority queue with first-in-first-out ordering among equal priorities.
pub struct PriorityQueue<P, V, O = NaturalOrder> {
    id: u64,
    heap: Vec<Entry<P, V>>,
    comparer: O,
    next_seq: u64,
    version: u64,
}

impl<P: Ord, V> PriorityQueue<P, V, NaturalOrder> {
    /// Creates an empty queue ordered by the natural order of `P`.
    pub fn new() -> Self {
        Self::with_comparer(NaturalOrder)
    }

    /// Creates an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparer(capacity, NaturalOrder)
    }
}

impl<P, V, O: Compare<P>> PriorityQueue<P, V, O> {
    /// Creates an empty queue ordered by `comparer`.
    pub fn with_comparer(comparer: O) -> Self {
        Self::with_capacity_and_comparer(0, comparer)
    }

    /// Creates an empty queue ordered by `comparer` with room for `capacity` entries.
    pub fn with_capacity_and_comparer(capacity: usize, comparer: O) -> Self {
        Self {
            id: NEXT_QUEUE_ID.fetch_add(1, atomic::Ordering::Relaxed),
            heap: Vec::with_capacity(capacity),
            comparer,
            next_seq: 0,
            version: 0,
        }
    }

    /// Returns the comparer that orders priorities.
    pub fn comparer(&self) -> &O {
        &self.comparer
    }

    /// Returns the number of queued values.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Adds `value` with the given `priority`.
    pub fn enqueue(&mut self, priority: P, value: V) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Entry {
            priority,
            seq,
            value,
        });
        self.sift_up(self.heap.len() - 1);
        self.bump();
    }

    /// Returns the value that [`dequeue`](Self::dequeue) would remove next.
    ///
    /// # Errors
    /// Returns [`Error::Empty`] if the queue is empty.
    pub fn peek(&self) -> Result<&V> {
        self.try_peek().ok_or(Error::Empty(NAME))
    }

    /// Like [`peek`](Self::peek), returning `None` on an empty queue.
    pub fn try_peek(&self) -> Option<&V> {
        self.heap.first().map(|e| &e.value)
    }

    /// Returns the minimal priority and its value without removing them.
    pub fn peek_entry(&self) -> Option<(&P, &V)> {
        self.heap.first().map(|e| (&e.priority, &e.value))
    }

    /// Removes and returns the value with the minimal priority, earliest-enqueued first.
    ///
    /// # Errors
    /// Returns [`Error::Empty`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<V> {
        self.try_dequeue().ok_or(Error::Empty(NAME))
    }

    /// Like [`dequeue`](Self::dequeue), returning `None` on an empty queue.
    pub fn try_dequeue(&mut self) -> Option<V> {
        self.pop_entry().map(|e| e.value)
    }

    /// Removes every queued value.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.bump();
    }

    /// Iterates over the queued values in the order they would be dequeued.
    pub fn iter(&self) -> Iter<'_, P, V> {
        Iter {
            entries: &self.heap,
            order: self.dequeue_order().into_iter(),
        }
    }

    /// Returns a cursor over the current contents in dequeue order.
    ///
    /// The cursor does not borrow the queue. Advancing it after the queue has been
    /// structurally modified fails with [`Error::ConcurrentModification`].
    pub fn cursor(&self) -> Cursor {
        Cursor {
            queue: self.id,
            order: self.dequeue_order(),
            position: 0,
            version: self.version,
        }
    }

    /// Consumes the queue, returning its values in dequeue order.
    pub fn into_sorted_vec(mut self) -> Vec<V> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(entry) = self.pop_entry() {
            out.push(entry.value);
        }
        out
    }

    fn pop_entry(&mut self) -> Option<Entry<P, V>> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let entry = self.heap.pop()?;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        self.bump();
        Some(entry)
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    fn order(&self, a: &Entry<P, V>, b: &Entry<P, V>) -> Ordering {
        self.comparer
            .compare(&a.priority, &b.priority)
            .then(a.seq.cmp(&b.seq))
    }

    // `true` if the entry at `a` leaves the queue before the entry at `b`.
    fn precedes(&self, a: usize, b: usize) -> bool {
        self.order(&self.heap[a], &self.heap[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > 0 {
            let parent = (node - 1) / 2;
            if self.precedes(node, parent) {
                self.heap.swap(parent, node);
                node = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * node + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut first = left;
            if right < len && self.precedes(right, left) {
                first = right;
            }

            if self.precedes(first, node) {
                self.heap.swap(node, first);
                node = first;
            } else {
                break;
            }
        }
    }

    fn dequeue_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.heap.len()).collect();
        order.sort_unstable_by(|&a, &b| self.order(&self.heap[a], &self.heap[b]));
        order
    }
}

impl<P: Ord, V> Default for PriorityQueue<P, V, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, V, O: Compare<P>> Extend<(P, V)> for PriorityQueue<P, V, O> {
    fn extend<I: IntoIterator<Item = (P, V)>>(&mut self, iter: I) {
        for (priority, value) in iter {
            self.enqueue(priority, value);
        }
    }
}

impl<P: Ord, V> FromIterator<(P, V)> for PriorityQueue<P, V, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<'a, P, V, O: Compare<P>> IntoIterator for &'a PriorityQueue<P, V, O> {
    type Item = &'a V;
    type IntoIter = Iter<'a, P, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P, V, O> fmt::Debug for PriorityQueue<P, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.heap.len())
            .field("version", &self.version)
            .finish()
    }
}

/// Borrowing iterator over a [`PriorityQueue`] in dequeue order.
pub struct Iter<'a, P, V> {
    entries: &'a [Entry<P, V>],
    order: std::vec::IntoIter<usize>,
}

impl<'a, P, V> Iterator for Iter<'a, P, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.order.next().map(|i| &self.entries[i].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<P, V> ExactSizeIterator for Iter<'_, P, V> {}

/// A detached position in a [`PriorityQueue`]'s dequeue order.
///
/// Created by [`PriorityQueue::cursor`]. The cursor remembers which queue it belongs to
/// and the version it was created at. It refuses to advance over any other queue, or
/// once its own queue has changed.
#[derive(Debug, Clone)]
pub struct Cursor {
    queue: u64,
    order: Vec<usize>,
    position: usize,
    version: u64,
}

impl Cursor {
    /// Advances the cursor, returning the next value in dequeue order.
    ///
    /// # Errors
    /// Returns [`Error::ConcurrentModification`] if `queue` is not the queue the cursor
    /// was created from, or if it has been enqueued to, dequeued from or cleared since.
    pub fn next<'q, P, V, O>(&mut self, queue: &'q PriorityQueue<P, V, O>) -> Result<Option<&'q V>> {
        if queue.id != self.queue || queue.version != self.version {
            return Err(Error::ConcurrentModification);
        }
        let Some(&index) = self.order.get(self.position) else {
            return Ok(None);
        };
        self.position += 1;
        Ok(queue.heap.get(index).map(|e| &e.value))
    }

    /// Returns the number of values the cursor has not yet visited.
    pub fn remaining(&self) -> usize {
        self.order.len() - self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<P, V, O: Compare<P>>(queue: &mut PriorityQueue<P, V, O>) -> Vec<V> {
        let mut out = Vec::new();
        while let Some(v) = queue.try_dequeue() {
            out.push(v);
        }
        out
    }

    #[test]
    fn test_ascending_order() {
        let mut queue = PriorityQueue::new();
        for x in [3, 7, -4, 6, 5] {
            queue.enqueue(x, x);
        }
        assert_eq!(drain(&mut queue), vec![-4, 3, 5, 6, 7]);
    }

    #[test]
    fn test_equal_priorities_are_fifo() {
        let mut queue = PriorityQueue::new();
        queue.enqueue(2, 'B');
        queue.enqueue(1, 'A');
        queue.enqueue(2, 'C');
        queue.enqueue(2, 'D');
        assert_eq!(drain(&mut queue), vec!['A', 'B', 'C', 'D']);
    }

    #[test]
    fn test_peek_matches_dequeue() {
        let mut queue = PriorityQueue::new();
        for x in [-7, -19, 4, 6, -8, -6] {
            queue.enqueue(x, x);
        }
        assert_eq!(queue.peek(), Ok(&-19));
        assert_eq!(queue.peek_entry(), Some((&-19, &-19)));
        assert_eq!(queue.dequeue(), Ok(-19));
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn test_empty_queue_errors() {
        let mut queue: PriorityQueue<i32, i32> = PriorityQueue::new();
        assert_eq!(queue.peek(), Err(Error::Empty("priority queue")));
        assert_eq!(queue.dequeue(), Err(Error::Empty("priority queue")));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_custom_comparer() {
        let mut queue = PriorityQueue::with_comparer(|a: &i32, b: &i32| b.cmp(a));
        for x in [1, 5, 2, 10] {
            queue.enqueue(x, x);
        }
        assert_eq!(drain(&mut queue), vec![10, 5, 2, 1]);
    }

    #[test]
    fn test_iter_in_dequeue_order() {
        let queue: PriorityQueue<i32, i32> =
            [6, -4, 6, -3, -7, 18, -3].into_iter().map(|x| (x, x)).collect();
        let seen: Vec<i32> = queue.iter().copied().collect();
        assert_eq!(seen, vec![-7, -4, -3, -3, 6, 6, 18]);
        assert_eq!(queue.len(), 7);
    }

    #[test]
    fn test_cursor_fails_after_mutation() {
        let mut queue = PriorityQueue::new();
        for x in [3, 7, -6, 4] {
            queue.enqueue(x, x);
        }
        let mut cursor = queue.cursor();
        assert_eq!(cursor.next(&queue), Ok(Some(&-6)));
        queue.enqueue(14, 14);
        assert_eq!(cursor.next(&queue), Err(Error::ConcurrentModification));
    }

    #[test]
    fn test_into_sorted_vec() {
        let mut queue = PriorityQueue::with_capacity(4);
        queue.extend([(2, "b"), (1, "a"), (2, "c")]);
        assert_eq!(queue.into_sorted_vec(), vec!["a", "b", "c"]);
    }
}
