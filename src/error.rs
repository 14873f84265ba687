//! Error type shared by the collections, graphs and the pathfinder.
//!
//! Every failure here is local and synchronous: it is reported to the caller of the
//! operation that detected it and nothing is retried. A search that finds no route is
//! *not* an error; it returns an empty [`Path`](crate::graph::Path).

use crate::graph::NodeId;
use thiserror::Error;

/// Errors raised by `trellis` collections and graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The node handle does not belong to the graph it was used with.
    #[error("node {0} does not belong to this graph")]
    UnknownNode(NodeId),

    /// A search endpoint (`"start"` or `"goal"`) is not a node of the searched graph.
    #[error("the {0} node does not belong to the searched graph")]
    UnknownEndpoint(&'static str),

    /// `peek`, `dequeue` or `pop` was called on an empty container.
    #[error("the {0} is empty")]
    Empty(&'static str),

    /// A queue cursor was advanced after the queue was structurally modified.
    #[error("the collection was modified; the cursor can no longer advance")]
    ConcurrentModification,

    /// A destination slice is too small to receive the collection at the given offset.
    #[error("cannot copy {len} items at offset {offset} into a slice of length {capacity}")]
    OutOfRange {
        /// Offset the copy would have started at.
        offset: usize,
        /// Number of items that had to be copied.
        len: usize,
        /// Length of the destination slice.
        capacity: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
