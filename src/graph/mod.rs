//! Symmetric graphs, traversals, persistent paths and A* search.
//!
//! The graph types are organized as follows:
//! - `neighbors`: the `HasNeighbors` read contract shared by every consumer
//! - `node_graph`: the arena-backed `Graph` with symmetric adjacency
//! - `observable`: `ObservableGraph`, which notifies handlers of neighbor changes
//! - `traverse`: breadth-first and depth-first iterators
//! - `path`: the persistent `Path` with incremental cost
//! - `astar`: best-first search returning a `Path`

pub mod astar;
pub mod neighbors;
pub mod node_graph;
pub mod observable;
pub mod path;
pub mod traverse;

pub use astar::{find_path, shortest_path, AStar, AcceptAll, FoundPath, NodeFilter};
pub use neighbors::HasNeighbors;
pub use node_graph::{Graph, NeighborCollection, Neighbors, NodeId, NodeRef};
pub use observable::{NeighborsChanged, ObservableGraph, ObservableNeighbors};
pub use path::{CostFns, CostModel, Path};
pub use traverse::{breadth_first, depth_first, BreadthFirst, DepthFirst};
