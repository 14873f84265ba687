//! `ObservableGraph` - a [`Graph`] that notifies per-node handlers of neighbor changes.
//!
//! Handlers are registered per node for two kinds of change: neighbors added and
//! neighbors removed. Every edge mutation first restores the symmetric invariant on both
//! endpoints and only then dispatches, so a handler always sees a consistent graph. Handlers
//! receive `&Graph<T>`; they can inspect it but cannot mutate it re-entrantly.
//!
//! Dispatch order:
//! - one edge added or removed: the owner's handlers, then the neighbor's;
//! - `clear`: the owner's handlers once with every removed neighbor, then each removed
//!   neighbor's handlers with the owner.

use super::neighbors::HasNeighbors;
use super::node_graph::{Graph, NodeId, NodeRef, Neighbors};
use crate::collections::set::MutableSet;
use crate::collections::subscribers::{SubscriptionId, Subscribers};
use crate::error::{Error, Result};
use core::fmt;
use std::collections::hash_set;

/// Notification payload: `sender` gained or lost `neighbors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborsChanged {
    /// The node whose neighbor set changed.
    pub sender: NodeId,
    /// The neighbors that were added to or removed from `sender`.
    pub neighbors: Vec<NodeId>,
}

impl NeighborsChanged {
    fn new(sender: NodeId, neighbors: Vec<NodeId>) -> Self {
        Self { sender, neighbors }
    }
}

type NeighborHandler<T> = dyn FnMut(&Graph<T>, &NeighborsChanged);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Added,
    Removed,
}

struct Listeners<T> {
    added: Subscribers<NeighborHandler<T>>,
    removed: Subscribers<NeighborHandler<T>>,
}

impl<T> Listeners<T> {
    fn new() -> Self {
        Self {
            added: Subscribers::new(),
            removed: Subscribers::new(),
        }
    }

    fn of(&mut self, change: Change) -> &mut Subscribers<NeighborHandler<T>> {
        match change {
            Change::Added => &mut self.added,
            Change::Removed => &mut self.removed,
        }
    }
}

/// An undirected graph with symmetric adjacency and neighbor-change notifications.
pub struct ObservableGraph<T> {
    graph: Graph<T>,
    listeners: Vec<Listeners<T>>,
}

impl<T> ObservableGraph<T> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty graph with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            graph: Graph::with_capacity(capacity),
            listeners: Vec::with_capacity(capacity),
        }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &Graph<T> {
        &self.graph
    }

    /// Drops every handler and returns the underlying graph.
    pub fn into_graph(self) -> Graph<T> {
        self.graph
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if `id` names a node of this graph.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.graph.contains_node(id)
    }

    /// Returns the payload of `id`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] for a handle of another graph.
    pub fn value(&self, id: NodeId) -> Result<&T> {
        self.graph.value(id)
    }

    /// Returns a read-only view of `id`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] for a handle of another graph.
    pub fn node(&self, id: NodeId) -> Result<NodeRef<'_, T>> {
        self.graph.node(id)
    }

    /// Adds an isolated node holding `value`.
    pub fn add_node(&mut self, value: T) -> NodeId {
        let id = self.graph.add_node(value);
        self.listeners.push(Listeners::new());
        id
    }

    /// Adds a node holding `value` and links it to each of `neighbors`.
    ///
    /// Each new edge notifies the existing neighbor's added-handlers.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] if any neighbor is foreign; nothing changes then.
    pub fn add_node_with_neighbors<I>(&mut self, value: T, neighbors: I) -> Result<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let neighbors: Vec<NodeId> = neighbors.into_iter().collect();
        for &neighbor in &neighbors {
            self.graph.slot(neighbor)?;
        }
        let id = self.add_node(value);
        for neighbor in neighbors {
            if self.graph.link(id, neighbor)? {
                self.dispatch(Change::Added, &edge_events(id, neighbor));
            }
        }
        Ok(id)
    }

    /// Returns the mutable, notifying neighbor set of `id`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] for a handle of another graph.
    pub fn neighbors_mut(&mut self, id: NodeId) -> Result<ObservableNeighbors<'_, T>> {
        let slot = self.graph.slot(id)?;
        Ok(ObservableNeighbors {
            graph: self,
            owner: id,
            slot,
        })
    }

    /// Registers `handler` to run whenever `node` gains neighbors.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] for a handle of another graph.
    pub fn on_neighbors_added<F>(&mut self, node: NodeId, handler: F) -> Result<SubscriptionId>
    where
        F: FnMut(&Graph<T>, &NeighborsChanged) + 'static,
    {
        self.subscribe(node, Change::Added, Box::new(handler))
    }

    /// Registers `handler` to run whenever `node` loses neighbors.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] for a handle of another graph.
    pub fn on_neighbors_removed<F>(&mut self, node: NodeId, handler: F) -> Result<SubscriptionId>
    where
        F: FnMut(&Graph<T>, &NeighborsChanged) + 'static,
    {
        self.subscribe(node, Change::Removed, Box::new(handler))
    }

    /// Removes a handler registered on `node`. Returns `false` if it was not registered.
    ///
    /// # Errors
    /// Returns [`Error::UnknownNode`] for a handle of another graph.
    pub fn unsubscribe(&mut self, node: NodeId, id: SubscriptionId) -> Result<bool> {
        let slot = self.graph.slot(node)?;
        let listeners = &mut self.listeners[slot];
        Ok(listeners.added.unsubscribe(id) || listeners.removed.unsubscribe(id))
    }

    fn subscribe(
        &mut self,
        node: NodeId,
        change: Change,
        handler: Box<NeighborHandler<T>>,
    ) -> Result<SubscriptionId> {
        let slot = self.graph.slot(node)?;
        Ok(self.listeners[slot].of(change).subscribe(handler))
    }

    fn dispatch(&mut self, change: Change, events: &[NeighborsChanged]) {
        let Self { graph, listeners } = self;
        let graph: &Graph<T> = graph;
        for event in events {
            let Some(node) = listeners.get_mut(event.sender.index()) else {
                continue;
            };
            let handlers = node.of(change);
            if handlers.is_empty() {
                continue;
            }
            tracing::trace!(sender = %event.sender, ?change, handlers = handlers.len(), "dispatching");
            handlers.for_each(|handler| handler(graph, event));
        }
    }
}

fn edge_events(owner: NodeId, neighbor: NodeId) -> [NeighborsChanged; 2] {
    [
        NeighborsChanged::new(owner, vec![neighbor]),
        NeighborsChanged::new(neighbor, vec![owner]),
    ]
}

impl<T> Default for ObservableGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableGraph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableGraph")
            .field("graph", &self.graph)
            .finish_non_exhaustive()
    }
}

impl<T> HasNeighbors for ObservableGraph<T> {
    type Node = NodeId;
    type Neighbors<'a> = Neighbors<'a> where Self: 'a;

    fn neighbors(&self, node: NodeId) -> Neighbors<'_> {
        self.graph.neighbors(node)
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.graph.contains_node(node)
    }
}

/// The notifying neighbor set of one node of an [`ObservableGraph`].
///
/// Behaves like [`NeighborCollection`](super::NeighborCollection), and raises the owner's
/// and the neighbors' events after each change.
pub struct ObservableNeighbors<'g, T> {
    graph: &'g mut ObservableGraph<T>,
    owner: NodeId,
    slot: usize,
}

impl<T> ObservableNeighbors<'_, T> {
    /// The node whose neighbors this collection holds.
    pub fn owner(&self) -> NodeId {
        self.owner
    }
}

impl<T> MutableSet<NodeId> for ObservableNeighbors<'_, T> {
    type Error = Error;
    type Iter<'a> = hash_set::Iter<'a, NodeId>
    where
        Self: 'a;

    fn add(&mut self, item: NodeId) -> Result<bool> {
        let added = self.graph.graph.link(self.owner, item)?;
        if added {
            self.graph
                .dispatch(Change::Added, &edge_events(self.owner, item));
        }
        Ok(added)
    }

    fn remove(&mut self, item: &NodeId) -> Result<bool> {
        let removed = self.graph.graph.unlink(self.owner, *item)?;
        if removed {
            self.graph
                .dispatch(Change::Removed, &edge_events(self.owner, *item));
        }
        Ok(removed)
    }

    fn contains(&self, item: &NodeId) -> Result<bool> {
        self.graph.graph.are_adjacent(self.owner, *item)
    }

    fn clear(&mut self) {
        let removed = self.graph.graph.unlink_all(self.slot);
        if removed.is_empty() {
            return;
        }
        let mut events = Vec::with_capacity(removed.len() + 1);
        events.extend(
            removed
                .iter()
                .map(|&neighbor| NeighborsChanged::new(neighbor, vec![self.owner])),
        );
        events.insert(0, NeighborsChanged::new(self.owner, removed));
        self.graph.dispatch(Change::Removed, &events);
    }

    fn len(&self) -> usize {
        self.graph.graph.neighbor_set(self.slot).len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.graph.graph.neighbor_set(self.slot).iter()
    }
}
