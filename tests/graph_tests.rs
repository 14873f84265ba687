use std::collections::HashSet;
use trellis::graph::{breadth_first, depth_first, Graph, HasNeighbors, NodeId};
use trellis::{Error, MutableSet};

fn neighbor_set(g: &Graph<&str>, id: NodeId) -> HashSet<NodeId> {
    g.neighbors(id).collect()
}

#[test]
fn test_add_adds_node_and_self_to_neighbor() -> anyhow::Result<()> {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");

    assert!(g.neighbors_mut(a)?.add(b)?);
    assert_eq!(neighbor_set(&g, a), HashSet::from([b]));
    assert_eq!(neighbor_set(&g, b), HashSet::from([a]));
    Ok(())
}

#[test]
fn test_add_returns_false_when_present() -> anyhow::Result<()> {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");

    g.neighbors_mut(a)?.add(b)?;
    assert!(!g.neighbors_mut(a)?.add(b)?);
    assert!(!g.neighbors_mut(b)?.add(a)?);
    assert_eq!(g.edge_count(), 1);
    Ok(())
}

#[test]
fn test_add_will_not_add_self() -> anyhow::Result<()> {
    let mut g = Graph::new();
    let a = g.add_node("a");

    assert!(!g.neighbors_mut(a)?.add(a)?);
    assert!(neighbor_set(&g, a).is_empty());
    Ok(())
}

#[test]
fn test_remove_removes_both_sides() -> anyhow::Result<()> {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let c = g.add_node("c");
    g.neighbors_mut(a)?.union_with([b, c])?;

    assert!(g.neighbors_mut(a)?.remove(&b)?);
    assert_eq!(neighbor_set(&g, a), HashSet::from([c]));
    assert!(neighbor_set(&g, b).is_empty());
    assert!(!g.neighbors_mut(a)?.remove(&b)?);
    Ok(())
}

#[test]
fn test_clear_removes_self_from_removed_neighbors() -> anyhow::Result<()> {
    let mut g = Graph::new();
    let hub = g.add_node("hub");
    let spokes: Vec<NodeId> = ["x", "y", "z"].into_iter().map(|s| g.add_node(s)).collect();
    g.neighbors_mut(hub)?.union_with(spokes.iter().copied())?;
    g.neighbors_mut(spokes[0])?.add(spokes[1])?;

    g.neighbors_mut(hub)?.clear();

    assert!(neighbor_set(&g, hub).is_empty());
    assert_eq!(neighbor_set(&g, spokes[0]), HashSet::from([spokes[1]]));
    assert_eq!(neighbor_set(&g, spokes[1]), HashSet::from([spokes[0]]));
    assert!(neighbor_set(&g, spokes[2]).is_empty());
    Ok(())
}

#[test]
fn test_contains() -> anyhow::Result<()> {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let c = g.add_node("c");
    g.neighbors_mut(a)?.add(b)?;

    let view = g.neighbors_mut(a)?;
    assert!(view.contains(&b)?);
    assert!(!view.contains(&c)?);
    assert_eq!(view.len(), 1);
    Ok(())
}

#[test]
fn test_foreign_handle_is_rejected_without_change() -> anyhow::Result<()> {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let mut other = Graph::new();
    let stranger = other.add_node("stranger");

    assert_eq!(g.neighbors_mut(a)?.add(stranger), Err(Error::UnknownNode(stranger)));
    assert_eq!(g.neighbors_mut(a)?.remove(&stranger), Err(Error::UnknownNode(stranger)));
    assert_eq!(g.neighbors_mut(a)?.contains(&stranger), Err(Error::UnknownNode(stranger)));
    assert!(g.neighbors_mut(stranger).is_err());
    assert!(neighbor_set(&g, a).is_empty());
    assert!(other.node(stranger)?.neighbors().next().is_none());
    Ok(())
}

#[test]
fn test_set_algebra_keeps_symmetry() -> anyhow::Result<()> {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let others: Vec<NodeId> = ["b", "c", "d", "e"].into_iter().map(|s| g.add_node(s)).collect();

    g.neighbors_mut(a)?.union_with(others.iter().copied())?;
    g.neighbors_mut(a)?.intersect_with([others[0], others[2]])?;
    g.neighbors_mut(a)?.symmetric_except_with([others[2], others[3]])?;

    assert_eq!(neighbor_set(&g, a), HashSet::from([others[0], others[3]]));
    for &o in &others {
        assert_eq!(g.are_adjacent(a, o)?, g.are_adjacent(o, a)?);
    }
    assert!(!g.are_adjacent(a, others[1])?);
    Ok(())
}

#[test]
fn test_copy_to_out_of_range() -> anyhow::Result<()> {
    let mut g = Graph::new();
    let a = g.add_node("a");
    let b = g.add_node("b");
    let c = g.add_node("c");
    g.neighbors_mut(a)?.union_with([b, c])?;

    let view = g.neighbors_mut(a)?;
    let mut dest = [a; 3];
    view.copy_to(&mut dest, 1)?;
    assert_eq!(HashSet::from([dest[1], dest[2]]), HashSet::from([b, c]));
    assert!(matches!(view.copy_to(&mut dest, 2), Err(Error::OutOfRange { .. })));
    Ok(())
}

#[test]
fn test_traversal_single_node() {
    let mut g = Graph::new();
    let lone = g.add_node("lone");
    assert_eq!(breadth_first(&g, lone).collect::<Vec<_>>(), vec![lone]);
    assert_eq!(depth_first(&g, lone).collect::<Vec<_>>(), vec![lone]);
}

#[test]
fn test_traversal_hierarchy_and_cycles() -> anyhow::Result<()> {
    let mut g = Graph::new();
    let grandparent = g.add_node("grandparent");
    let parent = g.add_node_with_neighbors("parent", [grandparent])?;
    for _ in 0..4 {
        g.add_node_with_neighbors("parent sibling", [grandparent])?;
    }
    let child = g.add_node_with_neighbors("child", [parent])?;
    for _ in 0..3 {
        g.add_node_with_neighbors("child sibling", [parent])?;
    }
    // Close a cycle through the grandparent.
    g.neighbors_mut(child)?.add(grandparent)?;
    let island = g.add_node("island");

    let expected: HashSet<NodeId> = g.nodes().map(|n| n.id()).filter(|&id| id != island).collect();

    let bfs: Vec<NodeId> = breadth_first(&g, parent).collect();
    let dfs: Vec<NodeId> = depth_first(&g, parent).collect();
    assert_eq!(bfs.len(), expected.len());
    assert_eq!(dfs.len(), expected.len());
    assert_eq!(bfs.iter().copied().collect::<HashSet<_>>(), expected);
    assert_eq!(dfs.iter().copied().collect::<HashSet<_>>(), expected);
    assert_eq!(bfs[0], parent);
    assert_eq!(dfs[0], parent);
    Ok(())
}

#[test]
fn test_node_views() -> anyhow::Result<()> {
    let mut g = Graph::with_capacity(2);
    let a = g.add_node("alpha");
    let b = g.add_node_with_neighbors("beta", [a])?;

    let node = g.node(b)?;
    assert_eq!(node.id(), b);
    assert_eq!(*node.value(), "beta");
    assert_eq!(node.degree(), 1);
    assert!(node.is_adjacent(a));
    assert_eq!(node.to_string(), "[beta]");
    assert_eq!(g.nodes().len(), 2);
    assert!(g.contains_node(a));
    Ok(())
}
