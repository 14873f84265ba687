//! # `trellis` - Symmetric Graphs and Generic A* Search
//!
//! A toolkit for undirected graphs whose adjacency stays symmetric under every mutation,
//! persistent paths with incremental cost, and a best-first (A*) pathfinder that runs
//! over anything exposing neighbors, with caller-defined, possibly non-numeric costs.
//!
//! ## Guarantees
//!
//! ### Graph Invariants
//! - **Symmetric adjacency**: for two distinct nodes `a` and `b` of one graph,
//!   `a ∈ N(b)` exactly when `b ∈ N(a)`. All edge mutation funnels through one place
//!   that updates both endpoints.
//! - **No self loops**: adding a node to its own neighbors is a no-op returning `false`.
//! - **Handle safety**: node handles carry the id of the graph that issued them; a handle
//!   from another graph is rejected with [`Error::UnknownNode`].
//!
//! ### Notifications
//! - Observers registered on an [`ObservableGraph`](graph::ObservableGraph) run only after
//!   both endpoints of every affected edge are updated, and receive a shared borrow of the
//!   graph, so they can never see or cause a half-applied change.
//!
//! ### Search
//! - The frontier is a stable [`PriorityQueue`](collections::PriorityQueue): equal keys
//!   leave in insertion order, which makes searches deterministic.
//! - Each node is expanded at most once, so searches terminate on cyclic graphs.
//! - An unreachable goal yields an empty [`Path`](graph::Path), not an error.
//!
//! ## Architecture
//!
//! 1. **Collections** (`collections`):
//!    - [`PriorityQueue`](collections::PriorityQueue): stable min-queue with checked cursors
//!    - [`MutableSet`](collections::MutableSet): set contract with the provided set algebra
//!    - [`Set`](collections::Set) and [`ObservableSet`](collections::ObservableSet)
//!
//! 2. **Graphs** (`graph`):
//!    - [`Graph`](graph::Graph) and [`ObservableGraph`](graph::ObservableGraph)
//!    - [`HasNeighbors`](graph::HasNeighbors): the read contract for traversals and search
//!    - [`BreadthFirst`](graph::BreadthFirst) / [`DepthFirst`](graph::DepthFirst)
//!
//! 3. **Paths and search** (`graph`):
//!    - [`Path`](graph::Path): immutable, structurally shared, O(1) cost lookup
//!    - [`AStar`](graph::AStar): configurable best-first search
//!
//! ## Example
//!
//! ```rust
//! use trellis::collections::MutableSet;
//! use trellis::graph::{shortest_path, Graph, NodeId};
//!
//! let mut g = Graph::<i32>::new();
//! let start = g.add_node(3);
//! let cheap = g.add_node_with_neighbors(4, [start])?;
//! let dear = g.add_node_with_neighbors(5, [start])?;
//! let end = g.add_node(2);
//! g.neighbors_mut(end)?.union_with([cheap, dear])?;
//!
//! let cost = |a: &NodeId, b: &NodeId| (g.value(*a).unwrap() - g.value(*b).unwrap()).abs();
//! let path = shortest_path(&g, start, end, cost, cost)?;
//!
//! assert_eq!(path.iter().copied().collect::<Vec<_>>(), vec![end, cheap, start]);
//! assert_eq!(*path.cost(), 3);
//! # Ok::<(), trellis::Error>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod collections;
pub mod error;
pub mod graph;

pub use collections::{Compare, MutableSet, NaturalOrder, PriorityQueue};
pub use error::{Error, Result};
pub use graph::{AStar, Graph, HasNeighbors, NodeId, ObservableGraph, Path};

// Compile-time assertions for layout and thread-safety claims.
const _: () = {
    use core::mem;

    // A handle is two 32-bit words.
    assert!(mem::size_of::<NodeId>() == 8);

    // A path is a pair of pointers: the shared family and the optional head link.
    assert!(mem::size_of::<Path<u32, u32, ()>>() == 2 * mem::size_of::<usize>());
};

const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Path<NodeId, u64, graph::CostFns<fn(&NodeId, &NodeId) -> u64, fn(u64, u64) -> u64>>>();
    assert_send_sync::<Graph<String>>();
    assert_send_sync::<Error>();
};
