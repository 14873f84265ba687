//! Mutable sets and the set algebra built on top of them.
//!
//! [`MutableSet`] is the contract shared by every set-like collection in the crate: the
//! plain hash-backed [`Set`], the [`ObservableSet`] and the neighbor collections of the
//! graph types. Implementors supply `add`/`remove`/`contains`/`clear`, a length and an
//! iterator; the algebra (union, intersection, difference, subset tests) is provided on
//! top of those primitives, so an implementor with side effects (such as keeping a graph
//! symmetric) gets them applied to every bulk operation too.
//!
//! The primitives are fallible through an associated error so that collections that
//! validate their arguments can report it; [`Set`] uses [`Infallible`].

pub mod observable;

pub use observable::{ObservableSet, SetChanged};

use crate::error::Error;
use core::convert::Infallible;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use rustc_hash::{FxBuildHasher, FxHashSet};
use std::collections::hash_set;
use std::collections::HashSet;

/// A set that supports adding, removing and membership tests.
pub trait MutableSet<T> {
    /// Error raised when an argument is rejected.
    type Error;

    /// Iterator over the items currently in the set.
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Adds `item`. Returns `true` if it was not already present.
    fn add(&mut self, item: T) -> Result<bool, Self::Error>;

    /// Removes `item`. Returns `true` if it was present.
    fn remove(&mut self, item: &T) -> Result<bool, Self::Error>;

    /// Returns `true` if `item` is in the set.
    fn contains(&self, item: &T) -> Result<bool, Self::Error>;

    /// Removes every item.
    fn clear(&mut self);

    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns `true` if the set has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the items, in no particular order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Adds every item of `other`, returning how many were newly added.
    fn union_with<I>(&mut self, other: I) -> Result<usize, Self::Error>
    where
        I: IntoIterator<Item = T>,
    {
        let mut added = 0;
        for item in other {
            if self.add(item)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Removes every item of `other`, returning how many were removed.
    fn except_with<I>(&mut self, other: I) -> Result<usize, Self::Error>
    where
        I: IntoIterator<Item = T>,
    {
        let mut removed = 0;
        for item in other {
            if self.remove(&item)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Removes the items matching `predicate`, returning how many were removed.
    fn remove_where<F>(&mut self, mut predicate: F) -> Result<usize, Self::Error>
    where
        F: FnMut(&T) -> bool,
        T: Clone,
    {
        let doomed: Vec<T> = self.iter().filter(|item| predicate(item)).cloned().collect();
        for item in &doomed {
            self.remove(item)?;
        }
        Ok(doomed.len())
    }

    /// Keeps only the items that also appear in `other`, returning how many were removed.
    fn intersect_with<I>(&mut self, other: I) -> Result<usize, Self::Error>
    where
        I: IntoIterator<Item = T>,
        T: Clone + Eq + Hash,
    {
        let theirs: FxHashSet<T> = other.into_iter().collect();
        self.remove_where(|item| !theirs.contains(item))
    }

    /// Keeps the items that are in exactly one of `self` and `other`.
    fn symmetric_except_with<I>(&mut self, other: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = T>,
        T: Eq + Hash,
    {
        let distinct: FxHashSet<T> = other.into_iter().collect();
        for item in distinct {
            if !self.remove(&item)? {
                self.add(item)?;
            }
        }
        Ok(())
    }

    /// Returns `true` if any item of `other` is in the set.
    fn overlaps<I>(&self, other: I) -> Result<bool, Self::Error>
    where
        I: IntoIterator<Item = T>,
    {
        for item in other {
            if self.contains(&item)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns `true` if the set holds exactly the distinct items of `other`.
    fn set_equals<I>(&self, other: I) -> Result<bool, Self::Error>
    where
        I: IntoIterator<Item = T>,
        T: Eq + Hash,
    {
        let theirs: FxHashSet<T> = other.into_iter().collect();
        if theirs.len() != self.len() {
            return Ok(false);
        }
        for item in &theirs {
            if !self.contains(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns `true` if every item of the set appears in `other`.
    fn is_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = T>,
        T: Eq + Hash,
    {
        let theirs: FxHashSet<T> = other.into_iter().collect();
        self.len() <= theirs.len() && self.iter().all(|item| theirs.contains(item))
    }

    /// Like [`is_subset_of`](Self::is_subset_of), additionally requiring `other` to be larger.
    fn is_proper_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = T>,
        T: Eq + Hash,
    {
        let theirs: FxHashSet<T> = other.into_iter().collect();
        self.len() < theirs.len() && self.iter().all(|item| theirs.contains(item))
    }

    /// Returns `true` if every item of `other` is in the set.
    fn is_superset_of<I>(&self, other: I) -> Result<bool, Self::Error>
    where
        I: IntoIterator<Item = T>,
        T: Eq + Hash,
    {
        let theirs: FxHashSet<T> = other.into_iter().collect();
        if self.len() < theirs.len() {
            return Ok(false);
        }
        for item in &theirs {
            if !self.contains(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Like [`is_superset_of`](Self::is_superset_of), additionally requiring the set to be larger.
    fn is_proper_superset_of<I>(&self, other: I) -> Result<bool, Self::Error>
    where
        I: IntoIterator<Item = T>,
        T: Eq + Hash,
    {
        let theirs: FxHashSet<T> = other.into_iter().collect();
        if self.len() <= theirs.len() {
            return Ok(false);
        }
        for item in &theirs {
            if !self.contains(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Clones the items into `dest`, starting at `offset`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `dest` cannot hold every item from `offset` on.
    fn copy_to(&self, dest: &mut [T], offset: usize) -> crate::Result<()>
    where
        T: Clone,
    {
        let len = self.len();
        let fits = offset
            .checked_add(len)
            .is_some_and(|end| end <= dest.len());
        if !fits {
            return Err(Error::OutOfRange {
                offset,
                len,
                capacity: dest.len(),
            });
        }
        for (slot, item) in dest[offset..].iter_mut().zip(self.iter()) {
            *slot = item.clone();
        }
        Ok(())
    }
}

/// A hash set implementing [`MutableSet`].
///
/// Equality is the item type's [`Eq`]; the hasher is pluggable and defaults to
/// `FxBuildHasher`.
#[derive(Clone)]
pub struct Set<T, S = FxBuildHasher> {
    items: HashSet<T, S>,
}

impl<T> Set<T, FxBuildHasher> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            items: HashSet::with_hasher(FxBuildHasher),
        }
    }

    /// Creates an empty set with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: HashSet::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }
}

impl<T, S> Set<T, S> {
    /// Creates an empty set that uses `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            items: HashSet::with_hasher(hasher),
        }
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates over the items, in no particular order.
    pub fn iter(&self) -> hash_set::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Eq + Hash, S: BuildHasher> Set<T, S> {
    /// Adds `item`. Returns `true` if it was not already present.
    pub fn insert(&mut self, item: T) -> bool {
        self.items.insert(item)
    }

    /// Removes `item`. Returns `true` if it was present.
    pub fn remove(&mut self, item: &T) -> bool {
        self.items.remove(item)
    }

    /// Returns `true` if `item` is in the set.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }
}

impl<T: Eq + Hash, S: BuildHasher> MutableSet<T> for Set<T, S> {
    type Error = Infallible;
    type Iter<'a> = hash_set::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn add(&mut self, item: T) -> Result<bool, Infallible> {
        Ok(self.items.insert(item))
    }

    fn remove(&mut self, item: &T) -> Result<bool, Infallible> {
        Ok(self.items.remove(item))
    }

    fn contains(&self, item: &T) -> Result<bool, Infallible> {
        Ok(self.items.contains(item))
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.items.iter()
    }
}

impl<T> Default for Set<T, FxBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> FromIterator<T> for Set<T, FxBuildHasher> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: Eq + Hash, S: BuildHasher> Extend<T> for Set<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, T, S> IntoIterator for &'a Set<T, S> {
    type Item = &'a T;
    type IntoIter = hash_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T, S> IntoIterator for Set<T, S> {
    type Item = T;
    type IntoIter = hash_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T: Eq + Hash, S: BuildHasher> PartialEq for Set<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq + Hash, S: BuildHasher> Eq for Set<T, S> {}

impl<T: fmt::Debug, S> fmt::Debug for Set<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}
