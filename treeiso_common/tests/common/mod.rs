#![allow(dead_code)]

use treeiso_common::{Graph, NodeLabel};

/// Assert that an invariant holds
#[macro_export]
macro_rules! assert_invariant {
    ($cond:expr, $invariant_name:expr) => {
        if !$cond {
            panic!(
                "Invariant violated: {}\nCondition: {}",
                $invariant_name,
                stringify!($cond)
            );
        }
    };
}

/// Edge set keyed by labels, each edge as `(min, max)`.
pub fn label_edges(graph: &Graph) -> Vec<(NodeLabel, NodeLabel)> {
    let mut edges: Vec<_> = graph
        .edges()
        .map(|(a, b)| {
            let (a, b) = (graph.label(a), graph.label(b));
            (a.min(b), a.max(b))
        })
        .collect();
    edges.sort_unstable();
    edges
}

/// Node labels, sorted.
pub fn label_nodes(graph: &Graph) -> Vec<NodeLabel> {
    let mut nodes: Vec<_> = graph.nodes().map(|n| graph.label(n)).collect();
    nodes.sort_unstable();
    nodes
}
