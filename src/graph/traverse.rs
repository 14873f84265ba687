//! Iterator-based traversals over any [`HasNeighbors`] structure.
//!
//! Both iterators yield the start node first and every reachable node exactly once.
//! A node is marked seen when it is discovered, not when it is yielded, so the frontier
//! never holds duplicates.

use super::neighbors::HasNeighbors;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// An iterator for Breadth-First Search (BFS).
///
/// Yields nodes in non-decreasing hop distance from the start.
pub struct BreadthFirst<'g, G: HasNeighbors + ?Sized> {
    graph: &'g G,
    seen: FxHashSet<G::Node>,
    queue: VecDeque<G::Node>,
}

impl<'g, G: HasNeighbors + ?Sized> BreadthFirst<'g, G> {
    /// Creates a new BFS iterator starting from `start`.
    ///
    /// A start node the graph does not contain yields nothing.
    pub fn new(graph: &'g G, start: G::Node) -> Self {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::new();
        if graph.contains_node(start) {
            seen.insert(start);
            queue.push_back(start);
        }
        Self { graph, seen, queue }
    }
}

impl<G: HasNeighbors + ?Sized> Iterator for BreadthFirst<'_, G> {
    type Item = G::Node;

    fn next(&mut self) -> Option<G::Node> {
        let node = self.queue.pop_front()?;
        for neighbor in self.graph.neighbors(node) {
            if self.seen.insert(neighbor) {
                self.queue.push_back(neighbor);
            }
        }
        Some(node)
    }
}

impl<G: HasNeighbors + ?Sized> FusedIterator for BreadthFirst<'_, G> {}

/// An iterator for Depth-First Search (DFS).
///
/// Uses an explicit stack, so deep graphs do not recurse.
pub struct DepthFirst<'g, G: HasNeighbors + ?Sized> {
    graph: &'g G,
    seen: FxHashSet<G::Node>,
    stack: Vec<G::Node>,
}

impl<'g, G: HasNeighbors + ?Sized> DepthFirst<'g, G> {
    /// Creates a new DFS iterator starting from `start`.
    ///
    /// A start node the graph does not contain yields nothing.
    pub fn new(graph: &'g G, start: G::Node) -> Self {
        let mut seen = FxHashSet::default();
        let mut stack = Vec::new();
        if graph.contains_node(start) {
            seen.insert(start);
            stack.push(start);
        }
        Self { graph, seen, stack }
    }
}

impl<G: HasNeighbors + ?Sized> Iterator for DepthFirst<'_, G> {
    type Item = G::Node;

    fn next(&mut self) -> Option<G::Node> {
        let node = self.stack.pop()?;
        for neighbor in self.graph.neighbors(node) {
            if self.seen.insert(neighbor) {
                self.stack.push(neighbor);
            }
        }
        Some(node)
    }
}

impl<G: HasNeighbors + ?Sized> FusedIterator for DepthFirst<'_, G> {}

/// Shorthand for [`BreadthFirst::new`].
pub fn breadth_first<G: HasNeighbors + ?Sized>(graph: &G, start: G::Node) -> BreadthFirst<'_, G> {
    BreadthFirst::new(graph, start)
}

/// Shorthand for [`DepthFirst::new`].
pub fn depth_first<G: HasNeighbors + ?Sized>(graph: &G, start: G::Node) -> DepthFirst<'_, G> {
    DepthFirst::new(graph, start)
}
