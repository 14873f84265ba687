//! A* best-first search over any [`HasNeighbors`] structure.
//!
//! The search is generic over the cost type: costs are produced by caller-supplied
//! functions, combined by a caller-supplied adder and ranked by a [`Compare`]. Nothing
//! requires the cost to be numeric.
//!
//! - `known_cost(a, b)` is the true cost of stepping between two adjacent nodes and
//!   accumulates into the returned [`Path`].
//! - `estimated_cost(node, goal)` is the heuristic. When it never overestimates the
//!   remaining cost, the returned path is a cheapest one.
//! - the filter excludes nodes: an excluded node is never expanded and never accepted as
//!   an endpoint.
//!
//! The frontier is a stable [`PriorityQueue`] of partial paths keyed by
//! `cost + estimate(tip, goal)`, so candidates with equal keys leave in the order they
//! were discovered. Each node is expanded at most once.
//!
//! Failing to find a route is not an error: the family's empty path is returned.

use super::neighbors::HasNeighbors;
use super::path::{CostFns, CostModel, Path};
use crate::collections::{Compare, NaturalOrder, PriorityQueue};
use crate::error::{Error, Result};
use core::fmt;
use core::ops::Add;
use num_traits::Zero;
use rustc_hash::FxHashSet;

/// Decides which nodes a search may visit.
pub trait NodeFilter<N: ?Sized> {
    /// Returns `true` if `node` may be part of a path.
    fn accept(&self, node: &N) -> bool;
}

/// A filter that accepts every node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl<N: ?Sized> NodeFilter<N> for AcceptAll {
    #[inline]
    fn accept(&self, _node: &N) -> bool {
        true
    }
}

impl<N: ?Sized, F> NodeFilter<N> for F
where
    F: Fn(&N) -> bool,
{
    #[inline]
    fn accept(&self, node: &N) -> bool {
        self(node)
    }
}

/// Path type returned by a search over `G` with step-cost `K` and adder `A`.
pub type FoundPath<G, C, K, A> = Path<<G as HasNeighbors>::Node, C, CostFns<K, A>>;

/// A configured A* search.
///
/// ```
/// use trellis::graph::{AStar, Graph, NodeId};
///
/// let mut g = Graph::<i32>::new();
/// let a = g.add_node(0);
/// let b = g.add_node_with_neighbors(2, [a])?;
/// let c = g.add_node_with_neighbors(1, [b])?;
///
/// let cost = |x: &NodeId, y: &NodeId| (g.value(*x).unwrap() - g.value(*y).unwrap()).abs();
/// let path = AStar::new(cost, cost, |l: i32, r: i32| l + r).find_path(&g, a, c)?;
///
/// assert_eq!(path.to_route(), vec![a, b, c]);
/// assert_eq!(*path.cost(), 3);
/// # Ok::<(), trellis::Error>(())
/// ```
#[derive(Clone)]
pub struct AStar<C, K, E, A, O = NaturalOrder, F = AcceptAll> {
    known: K,
    estimated: E,
    adder: A,
    comparer: O,
    filter: F,
    initial: C,
}

impl<C: Default, K, E, A> AStar<C, K, E, A> {
    /// Creates a search with the natural order of `C`, no filter, and `C::default()` as
    /// the initial cost.
    pub fn new(known_cost: K, estimated_cost: E, cost_adder: A) -> Self {
        Self::from_parts(known_cost, estimated_cost, cost_adder, C::default())
    }
}

impl<C, K, E, A> AStar<C, K, E, A> {
    fn from_parts(known: K, estimated: E, adder: A, initial: C) -> Self {
        Self {
            known,
            estimated,
            adder,
            comparer: NaturalOrder,
            filter: AcceptAll,
            initial,
        }
    }
}

impl<C, K, E, A, O, F> AStar<C, K, E, A, O, F> {
    /// Ranks frontier keys with `comparer` instead of the natural order.
    pub fn with_comparer<O2>(self, comparer: O2) -> AStar<C, K, E, A, O2, F> {
        AStar {
            known: self.known,
            estimated: self.estimated,
            adder: self.adder,
            comparer,
            filter: self.filter,
            initial: self.initial,
        }
    }

    /// Restricts the search to nodes accepted by `filter`.
    pub fn with_filter<F2>(self, filter: F2) -> AStar<C, K, E, A, O, F2> {
        AStar {
            known: self.known,
            estimated: self.estimated,
            adder: self.adder,
            comparer: self.comparer,
            filter,
            initial: self.initial,
        }
    }

    /// Sets the cost of the empty and single-node paths.
    #[must_use]
    pub fn with_initial_cost(mut self, initial: C) -> Self {
        self.initial = initial;
        self
    }

    /// Searches `graph` for a route from `start` to `goal`.
    ///
    /// Returns the path most recent first (`goal` at the head, `start` at the tail), or an
    /// empty path if `goal` is unreachable or either endpoint is filtered out.
    ///
    /// # Errors
    /// Returns [`Error::UnknownEndpoint`] if `graph` does not contain `start` or `goal`.
    pub fn find_path<G>(
        self,
        graph: &G,
        start: G::Node,
        goal: G::Node,
    ) -> Result<FoundPath<G, C, K, A>>
    where
        G: HasNeighbors + ?Sized,
        C: Clone,
        K: Fn(&G::Node, &G::Node) -> C,
        E: Fn(&G::Node, &G::Node) -> C,
        A: Fn(C, C) -> C,
        O: Compare<C>,
        F: NodeFilter<G::Node>,
    {
        if !graph.contains_node(start) {
            return Err(Error::UnknownEndpoint("start"));
        }
        if !graph.contains_node(goal) {
            return Err(Error::UnknownEndpoint("goal"));
        }

        let Self {
            known,
            estimated,
            adder,
            comparer,
            filter,
            initial,
        } = self;
        let empty: FoundPath<G, C, K, A> = Path::new(known, adder, initial);
        if !filter.accept(&start) || !filter.accept(&goal) {
            tracing::debug!("search endpoint rejected by filter");
            return Ok(empty);
        }

        let model = empty.model();
        let rank = |path: &FoundPath<G, C, K, A>, tip: &G::Node| -> C {
            CostModel::<G::Node, C>::add_costs(model, path.cost().clone(), estimated(tip, &goal))
        };

        let mut frontier = PriorityQueue::with_comparer(comparer);
        let mut visited: FxHashSet<G::Node> = FxHashSet::default();
        let seed = empty.push(start);
        frontier.enqueue(rank(&seed, &start), seed);

        let mut expanded = 0usize;
        while let Some(path) = frontier.try_dequeue() {
            let Some(&tip) = path.try_peek() else {
                continue;
            };
            if !visited.insert(tip) {
                continue;
            }
            if tip == goal {
                tracing::debug!(expanded, len = path.len(), "path found");
                return Ok(path);
            }

            expanded += 1;
            for neighbor in graph.neighbors(tip) {
                if visited.contains(&neighbor) || !filter.accept(&neighbor) {
                    continue;
                }
                let next = path.push(neighbor);
                frontier.enqueue(rank(&next, &neighbor), next);
            }
            tracing::trace!(expanded, frontier = frontier.len(), "expanded node");
        }

        tracing::debug!(expanded, "no path");
        Ok(empty.clear())
    }
}

impl<C: fmt::Debug, K, E, A, O, F> fmt::Debug for AStar<C, K, E, A, O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AStar")
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

/// Searches `graph` for a route from `start` to `goal` with the natural order of `C`,
/// no filter and `C::default()` as the initial cost.
///
/// # Errors
/// Returns [`Error::UnknownEndpoint`] if `graph` does not contain `start` or `goal`.
pub fn find_path<G, C, K, E, A>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    known_cost: K,
    estimated_cost: E,
    cost_adder: A,
) -> Result<FoundPath<G, C, K, A>>
where
    G: HasNeighbors + ?Sized,
    C: Clone + Default + Ord,
    K: Fn(&G::Node, &G::Node) -> C,
    E: Fn(&G::Node, &G::Node) -> C,
    A: Fn(C, C) -> C,
{
    AStar::new(known_cost, estimated_cost, cost_adder).find_path(graph, start, goal)
}

/// Searches with a numeric cost type: costs add with `+` and start at zero.
///
/// # Errors
/// Returns [`Error::UnknownEndpoint`] if `graph` does not contain `start` or `goal`.
pub fn shortest_path<G, C, K, E>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    known_cost: K,
    estimated_cost: E,
) -> Result<FoundPath<G, C, K, fn(C, C) -> C>>
where
    G: HasNeighbors + ?Sized,
    C: Zero + Ord + Clone,
    K: Fn(&G::Node, &G::Node) -> C,
    E: Fn(&G::Node, &G::Node) -> C,
{
    let adder: fn(C, C) -> C = <C as Add>::add;
    AStar::from_parts(known_cost, estimated_cost, adder, C::zero()).find_path(graph, start, goal)
}
