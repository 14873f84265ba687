//! `Path` - a persistent, structurally shared route with incrementally accumulated cost.
//!
//! A path is an immutable stack of nodes, most recent first. [`Path::push`] returns a new
//! path that shares every link of the old one and evaluates exactly one step cost;
//! [`Path::pop`] hands back the previous path without recomputing anything. Each link
//! stores the cumulative cost up to it, so [`Path::cost`] is O(1).
//!
//! Every path derived from one [`Path::new`] call belongs to the same *family*: it shares
//! the cost model and the initial cost through a single `Arc`. Paths are `Send + Sync`
//! whenever their nodes, costs and cost model are.
//!
//! # Example
//!
//! ```
//! use trellis::graph::Path;
//!
//! let empty = Path::new(|a: &i32, b: &i32| (a - b).abs(), |x: i32, y: i32| x + y, 0);
//! let path = empty.push(1).push(3).push(2).push(-2);
//!
//! assert_eq!(*path.cost(), 7);
//! assert_eq!(path.iter().copied().collect::<Vec<_>>(), vec![-2, 2, 3, 1]);
//! assert_eq!(*path.pop()?.cost(), 3);
//! assert!(empty.is_empty());
//! # Ok::<(), trellis::Error>(())
//! ```

use crate::error::{Error, Result};
use core::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

const NAME: &str = "path";

/// How the cost of a path is computed from its nodes.
pub trait CostModel<N, C> {
    /// Cost of stepping from `from` to `to`.
    fn step_cost(&self, from: &N, to: &N) -> C;

    /// Combines two costs. Must be associative.
    fn add_costs(&self, left: C, right: C) -> C;
}

/// A [`CostModel`] made of two closures.
#[derive(Debug, Clone, Copy)]
pub struct CostFns<K, A> {
    step: K,
    adder: A,
}

impl<K, A> CostFns<K, A> {
    /// Pairs a step-cost function with a cost adder.
    pub fn new(step: K, adder: A) -> Self {
        Self { step, adder }
    }
}

impl<N, C, K, A> CostModel<N, C> for CostFns<K, A>
where
    K: Fn(&N, &N) -> C,
    A: Fn(C, C) -> C,
{
    #[inline]
    fn step_cost(&self, from: &N, to: &N) -> C {
        (self.step)(from, to)
    }

    #[inline]
    fn add_costs(&self, left: C, right: C) -> C {
        (self.adder)(left, right)
    }
}

struct Family<M, C> {
    model: M,
    initial: C,
}

struct Link<N, C> {
    node: N,
    cost: C,
    len: usize,
    prev: Option<Arc<Link<N, C>>>,
}

impl<N, C> Drop for Link<N, C> {
    // Unwind long uniquely-owned chains iteratively instead of recursively.
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(link) = prev {
            match Arc::try_unwrap(link) {
                Ok(mut link) => prev = link.prev.take(),
                Err(_) => break,
            }
        }
    }
}

/// A persistent route of `N` nodes with cumulative cost `C` under the model `M`.
pub struct Path<N, C, M> {
    family: Arc<Family<M, C>>,
    head: Option<Arc<Link<N, C>>>,
}

impl<N, C, K, A> Path<N, C, CostFns<K, A>>
where
    K: Fn(&N, &N) -> C,
    A: Fn(C, C) -> C,
{
    /// Creates the empty path of a new family.
    ///
    /// `step` is the cost of moving between two consecutive nodes, `adder` combines
    /// costs, and `initial` is the cost of the empty and single-node paths.
    pub fn new(step: K, adder: A, initial: C) -> Self {
        Self::with_model(CostFns::new(step, adder), initial)
    }
}

impl<N, C, M: CostModel<N, C>> Path<N, C, M> {
    /// Creates the empty path of a new family that uses `model`.
    pub fn with_model(model: M, initial: C) -> Self {
        Self {
            family: Arc::new(Family { model, initial }),
            head: None,
        }
    }

    /// Returns a path with `node` appended as the new head.
    ///
    /// The receiver is left untouched.
    pub fn push(&self, node: N) -> Self
    where
        C: Clone,
    {
        let (cost, len) = match &self.head {
            None => (self.family.initial.clone(), 1),
            Some(head) => {
                let model = &self.family.model;
                let step = model.step_cost(&head.node, &node);
                (model.add_costs(head.cost.clone(), step), head.len + 1)
            }
        };
        Self {
            family: Arc::clone(&self.family),
            head: Some(Arc::new(Link {
                node,
                cost,
                len,
                prev: self.head.clone(),
            })),
        }
    }
}

impl<N, C, M> Path<N, C, M> {
    /// The most recently pushed node.
    ///
    /// # Errors
    /// Returns [`Error::Empty`] if the path is empty.
    pub fn peek(&self) -> Result<&N> {
        self.try_peek().ok_or(Error::Empty(NAME))
    }

    /// The most recently pushed node, or `None` if the path is empty.
    pub fn try_peek(&self) -> Option<&N> {
        self.head.as_deref().map(|link| &link.node)
    }

    /// The path before the last push.
    ///
    /// # Errors
    /// Returns [`Error::Empty`] if the path is empty.
    pub fn pop(&self) -> Result<Self> {
        let head = self.head.as_ref().ok_or(Error::Empty(NAME))?;
        Ok(Self {
            family: Arc::clone(&self.family),
            head: head.prev.clone(),
        })
    }

    /// The empty path of this family.
    pub fn clear(&self) -> Self {
        Self {
            family: Arc::clone(&self.family),
            head: None,
        }
    }

    /// Cumulative cost of the path.
    pub fn cost(&self) -> &C {
        self.head
            .as_deref()
            .map_or(&self.family.initial, |link| &link.cost)
    }

    /// The family's cost model.
    pub fn model(&self) -> &M {
        &self.family.model
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.head.as_deref().map_or(0, |link| link.len)
    }

    /// Returns `true` if the path has no nodes.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Iterates over the nodes, most recent first.
    pub fn iter(&self) -> Iter<'_, N, C> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Alias of [`iter`](Self::iter).
    pub fn nodes(&self) -> Iter<'_, N, C> {
        self.iter()
    }

    /// The nodes in traversal order, oldest first.
    pub fn to_route(&self) -> Vec<N>
    where
        N: Clone,
    {
        let mut route: Vec<N> = self.iter().cloned().collect();
        route.reverse();
        route
    }

    /// Returns `true` if both values are the same shared path.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.same_family(other)
            && match (&self.head, &other.head) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }

    /// Returns `true` if both paths descend from the same [`Path::new`] call.
    pub fn same_family(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.family, &other.family)
    }
}

impl<N, C, M> Clone for Path<N, C, M> {
    fn clone(&self) -> Self {
        Self {
            family: Arc::clone(&self.family),
            head: self.head.clone(),
        }
    }
}

impl<N: PartialEq, C: PartialEq, M> PartialEq for Path<N, C, M> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.len() == other.len() && self.cost() == other.cost() && self.iter().eq(other.iter()))
    }
}

impl<N: fmt::Debug, C: fmt::Debug, M> fmt::Debug for Path<N, C, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("nodes", &self.iter().collect::<Vec<_>>())
            .field("cost", self.cost())
            .finish()
    }
}

impl<'a, N, C, M> IntoIterator for &'a Path<N, C, M> {
    type Item = &'a N;
    type IntoIter = Iter<'a, N, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the nodes of a [`Path`], most recent first.
pub struct Iter<'a, N, C> {
    next: Option<&'a Link<N, C>>,
}

impl<'a, N, C> Iterator for Iter<'a, N, C> {
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        let link = self.next?;
        self.next = link.prev.as_deref();
        Some(&link.node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.next.map_or(0, |link| link.len);
        (len, Some(len))
    }
}

impl<N, C> ExactSizeIterator for Iter<'_, N, C> {}
impl<N, C> FusedIterator for Iter<'_, N, C> {}

impl<N, C> Clone for Iter<'_, N, C> {
    fn clone(&self) -> Self {
        Self { next: self.next }
    }
}
