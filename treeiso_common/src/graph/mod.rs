//! Undirected simple graph shared by host graphs and query trees.
//!
//! Nodes are addressed by dense [`GraphNodeIdx`] values; the original
//! integer labels are kept in a [`NodeRegistry`] so results can be reported
//! in the caller's terms. Self-loops are never stored: adding `(x, x)` only
//! registers `x`, which is how edge-list files encode isolated nodes.

mod registry;

pub use registry::{GraphNodeIdx, NodeLabel, NodeRegistry};

use std::collections::VecDeque;

use contracts::*;

/// An undirected graph with sorted adjacency lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    registry: NodeRegistry,
    /// Sorted, duplicate-free neighbor lists indexed by node.
    adjacency: Vec<Vec<GraphNodeIdx>>,
    num_edges: usize,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from `(a, b)` label pairs. Pairs with `a == b` only
    /// register the node.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeLabel, NodeLabel)>,
    {
        let mut graph = Self::new();
        for (a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Registers `label` and returns its index.
    #[debug_ensures(self.registry.len() == self.adjacency.len())]
    pub fn add_node(&mut self, label: NodeLabel) -> GraphNodeIdx {
        let (idx, fresh) = self.registry.intern(label);
        if fresh {
            self.adjacency.push(Vec::new());
        }
        idx
    }

    /// Adds the undirected edge `a - b`. Returns false if the edge was
    /// already present or is a self-loop.
    pub fn add_edge(&mut self, a: NodeLabel, b: NodeLabel) -> bool {
        let a = self.add_node(a);
        let b = self.add_node(b);
        if a == b {
            return false;
        }
        let Err(pos) = self.adjacency[a.as_usize()].binary_search(&b) else {
            return false;
        };
        self.adjacency[a.as_usize()].insert(pos, b);
        if let Err(pos) = self.adjacency[b.as_usize()].binary_search(&a) {
            self.adjacency[b.as_usize()].insert(pos, a);
        }
        self.num_edges += 1;
        true
    }

    /// Removes the edge between two existing nodes. Returns false if absent.
    pub fn remove_edge(&mut self, a: GraphNodeIdx, b: GraphNodeIdx) -> bool {
        let Ok(pos) = self.adjacency[a.as_usize()].binary_search(&b) else {
            return false;
        };
        self.adjacency[a.as_usize()].remove(pos);
        if let Ok(pos) = self.adjacency[b.as_usize()].binary_search(&a) {
            self.adjacency[b.as_usize()].remove(pos);
        }
        self.num_edges -= 1;
        true
    }

    /// Number of nodes.
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.registry.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub const fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Iterates node indices in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = GraphNodeIdx> + use<> {
        (0..self.num_nodes()).map(GraphNodeIdx::from)
    }

    /// Iterates each edge once as `(a, b)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (GraphNodeIdx, GraphNodeIdx)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(a, neighbors)| {
                let a = GraphNodeIdx::from(a);
                neighbors
                    .iter()
                    .filter(move |&&b| a < b)
                    .map(move |&b| (a, b))
            })
    }

    /// Sorted neighbors of `node`.
    #[must_use]
    pub fn neighbors(&self, node: GraphNodeIdx) -> &[GraphNodeIdx] {
        &self.adjacency[node.as_usize()]
    }

    /// Degree of `node`.
    #[must_use]
    pub fn degree(&self, node: GraphNodeIdx) -> usize {
        self.adjacency[node.as_usize()].len()
    }

    /// Checks adjacency with a binary search over the smaller list.
    #[must_use]
    pub fn has_edge(&self, a: GraphNodeIdx, b: GraphNodeIdx) -> bool {
        let (small, other) = if self.degree(a) <= self.degree(b) {
            (a, b)
        } else {
            (b, a)
        };
        self.adjacency[small.as_usize()].binary_search(&other).is_ok()
    }

    /// External label of `node`.
    #[must_use]
    pub fn label(&self, node: GraphNodeIdx) -> NodeLabel {
        self.registry.label(node)
    }

    /// Index assigned to `label`, if present.
    #[must_use]
    pub fn index_of(&self, label: NodeLabel) -> Option<GraphNodeIdx> {
        self.registry.index_of(label)
    }

    /// Nodes without incident edges.
    pub fn isolated_nodes(&self) -> impl Iterator<Item = GraphNodeIdx> + '_ {
        self.nodes().filter(|&n| self.degree(n) == 0)
    }

    /// Number of edges with both endpoints in `nodes`.
    #[must_use]
    pub fn induced_edge_count(&self, nodes: &[GraphNodeIdx]) -> usize {
        let mut count = 0;
        for (i, &a) in nodes.iter().enumerate() {
            for &b in &nodes[i + 1..] {
                if self.has_edge(a, b) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Returns true if every node is reachable from the first one.
    /// The empty graph counts as connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.nodes().next() else {
            return true;
        };
        let mut seen = vec![false; self.num_nodes()];
        let mut queue = VecDeque::from([start]);
        seen[start.as_usize()] = true;
        let mut reached = 1;
        while let Some(node) = queue.pop_front() {
            for &next in self.neighbors(node) {
                if !seen[next.as_usize()] {
                    seen[next.as_usize()] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached == self.num_nodes()
    }

    /// A tree is a non-empty connected graph with exactly `n - 1` edges.
    #[must_use]
    pub fn is_tree(&self) -> bool {
        !self.is_empty() && self.num_edges + 1 == self.num_nodes() && self.is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_loop_registers_node_without_edge() {
        let graph = Graph::from_edges([(1, 2), (7, 7)]);
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 1);
        let seven = graph.index_of(7).unwrap();
        assert_eq!(graph.degree(seven), 0);
        assert!(!graph.has_edge(seven, seven));
    }

    #[test]
    fn duplicate_edges_collapse() {
        let mut graph = Graph::new();
        assert!(graph.add_edge(1, 2));
        assert!(!graph.add_edge(2, 1));
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.edges().count(), 1);
    }

    #[test]
    fn sparse_labels_get_dense_indices() {
        let graph = Graph::from_edges([(100, 5), (5, 42)]);
        let labels: Vec<_> = graph.nodes().map(|n| graph.label(n)).collect();
        assert_eq!(labels, vec![100, 5, 42]);
        assert_eq!(graph.index_of(42), Some(GraphNodeIdx::new(2)));
        assert_eq!(graph.index_of(3), None);
    }

    #[test]
    fn tree_detection() {
        assert!(Graph::from_edges([(0, 1), (1, 2), (1, 3)]).is_tree());
        assert!(Graph::from_edges([(0, 0)]).is_tree());
        assert!(!Graph::new().is_tree());
        // cycle
        assert!(!Graph::from_edges([(0, 1), (1, 2), (2, 0)]).is_tree());
        // right edge count, but disconnected
        assert!(!Graph::from_edges([(0, 1), (1, 2), (2, 0), (3, 3)]).is_tree());
    }

    #[test]
    fn induced_edges() {
        let graph = Graph::from_edges([(0, 1), (1, 2), (2, 0), (2, 3)]);
        let tri: Vec<_> = [0, 1, 2].iter().map(|&l| graph.index_of(l).unwrap()).collect();
        assert_eq!(graph.induced_edge_count(&tri), 3);
        let pair: Vec<_> = [0, 3].iter().map(|&l| graph.index_of(l).unwrap()).collect();
        assert_eq!(graph.induced_edge_count(&pair), 0);
    }
}
