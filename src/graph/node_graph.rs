//! `Graph` - an undirected graph whose adjacency is kept symmetric by construction.
//!
//! Nodes live in an arena owned by the graph and are addressed by [`NodeId`] handles.
//! Each node carries an immutable payload and a set of neighbor handles. Every edge
//! mutation goes through one of three internal operations (`link`, `unlink` and
//! `unlink_all`) that update both endpoints together, so for two distinct nodes `a` and `b`,
//! `a ∈ N(b)` exactly when `b ∈ N(a)`. A node is never its own neighbor.
//!
//! Each graph draws a process-unique id that is stamped into its handles. A handle from
//! another graph never compares equal to a local one and is rejected with
//! [`Error::UnknownNode`]. Both ids are 32 bits wide: a process can create at most
//! `u32::MAX` graphs and a graph can hold at most `u32::MAX` nodes. Going past either
//! limit panics rather than handing out a handle that aliases an existing one.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `add_node` | \(O(1)\) amortized | Appends to the arena |
//! | `add_node_with_neighbors` | \(O(k)\) | Validates all `k` neighbors first |
//! | neighbor `add` / `remove` | \(O(1)\) expected | Two hash-set updates |
//! | neighbor `clear` | \(O(\text{degree})\) | Visits every former neighbor |
//! | `neighbors` | \(O(1)\) | Borrowing iterator |

use super::neighbors::HasNeighbors;
use crate::collections::set::MutableSet;
use crate::error::{Error, Result};
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};
use rustc_hash::FxHashSet;
use std::collections::hash_set;
use std::iter::FusedIterator;

static NEXT_GRAPH_ID: AtomicU32 = AtomicU32::new(0);

fn next_graph_id() -> u32 {
    match NEXT_GRAPH_ID.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1)) {
        Ok(id) => id,
        Err(_) => panic!("graph ids exhausted"),
    }
}

fn node_index(len: usize) -> u32 {
    match u32::try_from(len) {
        Ok(index) if index < u32::MAX => index,
        _ => panic!("graph node capacity exceeded"),
    }
}

/// Handle to a node of one specific [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    graph: u32,
    index: u32,
}

impl NodeId {
    /// Position of the node in its graph, in creation order.
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} of graph {}", self.index, self.graph)
    }
}

struct NodeData<T> {
    value: T,
    neighbors: FxHashSet<NodeId>,
}

/// An undirected graph with symmetric adjacency.
pub struct Graph<T> {
    id: u32,
    nodes: Vec<NodeData<T>>,
}

impl<T> Graph<T> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty graph with room for `capacity` nodes.
    ///
    /// # Panics
    /// Panics once `u32::MAX` graphs have been created in this process.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: next_graph_id(),
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbors.len()).sum::<usize>() / 2
    }

    /// Returns `true` if the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds an isolated node holding `value`.
    ///
    /// # Panics
    /// Panics if the graph already holds `u32::MAX` nodes.
    pub fn add_node(&mut self, value: T) -> NodeId {
        let id = NodeId {
            graph: self.id,
            index: node_index(self.nodes.len()),
        };
        self.nodes.push(NodeData {
            value,
            neighbors: FxHashSet::default(),
        });
        id
    }

    /// Adds a node holding `value` and links it to each of `neighbors`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] if any neighbor does not belong to this graph. All
    /// neighbors are checked before the node is created, so on error nothing changes.
    pub fn add_node_with_neighbors<I>(&mut self, value: T, neighbors: I) -> Result<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let neighbors: Vec<NodeId> = neighbors.into_iter().collect();
        for &neighbor in &neighbors {
            self.slot(neighbor)?;
        }
        let id = self.add_node(value);
        for neighbor in neighbors {
            self.link(id, neighbor)?;
        }
        Ok(id)
    }

    /// Returns `true` if `id` names a node of this graph.
    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        id.graph == self.id && id.index() < self.nodes.len()
    }

    /// Returns the payload of `id`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] for a handle of another graph.
    pub fn value(&self, id: NodeId) -> Result<&T> {
        Ok(&self.nodes[self.slot(id)?].value)
    }

    /// Returns a read-only view of `id`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] for a handle of another graph.
    pub fn node(&self, id: NodeId) -> Result<NodeRef<'_, T>> {
        let slot = self.slot(id)?;
        Ok(NodeRef {
            id,
            data: &self.nodes[slot],
        })
    }

    /// Returns the mutable neighbor set of `id`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] for a handle of another graph.
    pub fn neighbors_mut(&mut self, id: NodeId) -> Result<NeighborCollection<'_, T>> {
        let slot = self.slot(id)?;
        Ok(NeighborCollection {
            graph: self,
            owner: id,
            slot,
        })
    }

    /// Returns `true` if `a` and `b` are neighbors.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] if either handle is foreign.
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> Result<bool> {
        let slot = self.slot(a)?;
        self.slot(b)?;
        Ok(self.nodes[slot].neighbors.contains(&b))
    }

    /// Iterates over every node in creation order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeRef<'_, T>> + '_ {
        let graph = self.id;
        self.nodes.iter().enumerate().map(move |(index, data)| NodeRef {
            id: NodeId {
                graph,
                index: index as u32,
            },
            data,
        })
    }

    pub(crate) fn slot(&self, id: NodeId) -> Result<usize> {
        if self.contains_node(id) {
            Ok(id.index())
        } else {
            Err(Error::UnknownNode(id))
        }
    }

    /// Makes `a` and `b` neighbors of each other. Returns `true` if the edge is new.
    ///
    /// Linking a node to itself is a no-op returning `false`.
    pub(crate) fn link(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        let (sa, sb) = (self.slot(a)?, self.slot(b)?);
        if sa == sb {
            return Ok(false);
        }
        let added = self.nodes[sa].neighbors.insert(b);
        if added {
            self.nodes[sb].neighbors.insert(a);
            tracing::trace!(%a, %b, "linked");
        }
        debug_assert_eq!(
            self.nodes[sa].neighbors.contains(&b),
            self.nodes[sb].neighbors.contains(&a)
        );
        Ok(added)
    }

    /// Removes the edge between `a` and `b`. Returns `true` if it existed.
    pub(crate) fn unlink(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        let (sa, sb) = (self.slot(a)?, self.slot(b)?);
        let removed = self.nodes[sa].neighbors.remove(&b);
        if removed {
            self.nodes[sb].neighbors.remove(&a);
            tracing::trace!(%a, %b, "unlinked");
        }
        Ok(removed)
    }

    pub(crate) fn neighbor_set(&self, slot: usize) -> &FxHashSet<NodeId> {
        &self.nodes[slot].neighbors
    }

    /// Removes every edge of the node in `slot`, returning the former neighbors.
    pub(crate) fn unlink_all(&mut self, slot: usize) -> Vec<NodeId> {
        let owner = NodeId {
            graph: self.id,
            index: slot as u32,
        };
        let removed: Vec<NodeId> = std::mem::take(&mut self.nodes[slot].neighbors)
            .into_iter()
            .collect();
        for neighbor in &removed {
            self.nodes[neighbor.index()].neighbors.remove(&owner);
        }
        tracing::trace!(%owner, removed = removed.len(), "cleared neighbors");
        removed
    }
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("id", &self.id)
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edge_count())
            .finish()
    }
}

impl<T> HasNeighbors for Graph<T> {
    type Node = NodeId;
    type Neighbors<'a> = Neighbors<'a> where Self: 'a;

    /// Neighbors of `node`; empty for a handle of another graph.
    fn neighbors(&self, node: NodeId) -> Neighbors<'_> {
        Neighbors {
            inner: self
                .slot(node)
                .ok()
                .map(|slot| self.nodes[slot].neighbors.iter()),
        }
    }

    fn contains_node(&self, node: NodeId) -> bool {
        Graph::contains_node(self, node)
    }
}

/// Iterator over the neighbor handles of one node.
#[derive(Clone, Debug, Default)]
pub struct Neighbors<'a> {
    inner: Option<hash_set::Iter<'a, NodeId>>,
}

impl Iterator for Neighbors<'_> {
    type Item = NodeId;

    #[inline]
    fn next(&mut self) -> Option<NodeId> {
        self.inner.as_mut()?.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl ExactSizeIterator for Neighbors<'_> {}
impl FusedIterator for Neighbors<'_> {}

/// A borrowed, read-only view of one node.
pub struct NodeRef<'g, T> {
    id: NodeId,
    data: &'g NodeData<T>,
}

impl<'g, T> NodeRef<'g, T> {
    /// The node's handle.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's payload.
    pub fn value(&self) -> &'g T {
        &self.data.value
    }

    /// The node's neighbors.
    pub fn neighbors(&self) -> Neighbors<'g> {
        Neighbors {
            inner: Some(self.data.neighbors.iter()),
        }
    }

    /// Number of neighbors.
    pub fn degree(&self) -> usize {
        self.data.neighbors.len()
    }

    /// Returns `true` if `other` is a neighbor of this node.
    pub fn is_adjacent(&self, other: NodeId) -> bool {
        self.data.neighbors.contains(&other)
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: fmt::Display> fmt::Display for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.data.value)
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", &self.data.value)
            .field("degree", &self.data.neighbors.len())
            .finish()
    }
}

/// The mutable neighbor set of one node.
///
/// Adding or removing a neighbor updates the other endpoint as well. Adding the owner
/// itself is a no-op returning `false`. Handles of other graphs are rejected with
/// [`Error::UnknownNode`].
pub struct NeighborCollection<'g, T> {
    graph: &'g mut Graph<T>,
    owner: NodeId,
    slot: usize,
}

impl<T> NeighborCollection<'_, T> {
    /// The node whose neighbors this collection holds.
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// The graph the owner belongs to.
    pub fn graph(&self) -> &Graph<T> {
        self.graph
    }
}

impl<T> MutableSet<NodeId> for NeighborCollection<'_, T> {
    type Error = Error;
    type Iter<'a> = hash_set::Iter<'a, NodeId>
    where
        Self: 'a;

    fn add(&mut self, item: NodeId) -> Result<bool> {
        self.graph.link(self.owner, item)
    }

    fn remove(&mut self, item: &NodeId) -> Result<bool> {
        self.graph.unlink(self.owner, *item)
    }

    fn contains(&self, item: &NodeId) -> Result<bool> {
        self.graph.are_adjacent(self.owner, *item)
    }

    fn clear(&mut self) {
        self.graph.unlink_all(self.slot);
    }

    fn len(&self) -> usize {
        self.graph.neighbor_set(self.slot).len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.graph.neighbor_set(self.slot).iter()
    }
}

impl<T> fmt::Debug for NeighborCollection<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NeighborCollection")
            .field("owner", &self.owner)
            .field("neighbors", self.graph.neighbor_set(self.slot))
            .finish()
    }
}
