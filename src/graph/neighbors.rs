//! The read-only neighbor contract consumed by traversals and the pathfinder.

use core::hash::Hash;

/// A structure whose nodes expose their adjacent nodes.
///
/// Nodes are small copyable handles (graph node ids, grid coordinates, ...). Implementors
/// are free to compute neighbors on the fly; nothing here requires the graph to be stored.
///
/// # Example
///
/// ```
/// use trellis::graph::HasNeighbors;
///
/// /// Integers on a line, each adjacent to its predecessor and successor.
/// struct Line;
///
/// impl HasNeighbors for Line {
///     type Node = i64;
///     type Neighbors<'a> = std::array::IntoIter<i64, 2>;
///
///     fn neighbors(&self, node: i64) -> Self::Neighbors<'_> {
///         [node - 1, node + 1].into_iter()
///     }
/// }
///
/// let around: Vec<i64> = Line.neighbors(4).collect();
/// assert_eq!(around, vec![3, 5]);
/// ```
pub trait HasNeighbors {
    /// Handle naming one node.
    type Node: Copy + Eq + Hash;

    /// Iterator over the neighbors of one node.
    type Neighbors<'a>: Iterator<Item = Self::Node>
    where
        Self: 'a;

    /// Returns the nodes adjacent to `node`.
    fn neighbors(&self, node: Self::Node) -> Self::Neighbors<'_>;

    /// Returns `true` if `node` belongs to this structure.
    ///
    /// Structures with an unbounded node space accept every node.
    fn contains_node(&self, node: Self::Node) -> bool {
        let _ = node;
        true
    }
}

impl<G: HasNeighbors + ?Sized> HasNeighbors for &G {
    type Node = G::Node;
    type Neighbors<'a> = G::Neighbors<'a> where Self: 'a;

    #[inline]
    fn neighbors(&self, node: Self::Node) -> Self::Neighbors<'_> {
        (**self).neighbors(node)
    }

    #[inline]
    fn contains_node(&self, node: Self::Node) -> bool {
        (**self).contains_node(node)
    }
}
