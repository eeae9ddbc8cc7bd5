//! Random and deterministic graph generators.
//!
//! Every random generator takes the generator state explicitly so a run can
//! be reproduced from its seed. Nodes are labelled `0..n`.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::{Graph, GraphError, GraphNodeIdx, NodeLabel};

fn with_nodes(n: usize) -> Graph {
    let mut graph = Graph::new();
    for label in 0..n as NodeLabel {
        graph.add_node(label);
    }
    graph
}

fn check_probability(p: f64) -> Result<(), GraphError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(GraphError::invalid_parameter(format!(
            "probability {p} outside [0, 1]"
        )))
    }
}

/// G(n, p): every pair is joined independently with probability `p`.
pub fn erdos_renyi<R: Rng>(n: usize, p: f64, rng: &mut R) -> Result<Graph, GraphError> {
    check_probability(p)?;
    let mut graph = with_nodes(n);
    for a in 0..n as NodeLabel {
        for b in (a + 1)..n as NodeLabel {
            if rng.gen_bool(p) {
                graph.add_edge(a, b);
            }
        }
    }
    Ok(graph)
}

/// Preferential attachment: starts from a star on `m + 1` nodes, then each
/// new node attaches to `m` distinct existing nodes chosen proportionally to
/// their degree.
pub fn barabasi_albert<R: Rng>(n: usize, m: usize, rng: &mut R) -> Result<Graph, GraphError> {
    if m < 1 || m >= n {
        return Err(GraphError::invalid_parameter(format!(
            "barabasi_albert requires 1 <= m < n, got m={m}, n={n}"
        )));
    }
    let mut graph = star(m + 1);
    // one entry per edge endpoint, so sampling is degree-proportional
    let mut repeated: Vec<NodeLabel> = Vec::with_capacity(2 * n * m);
    for (a, b) in graph.edges() {
        repeated.push(graph.label(a));
        repeated.push(graph.label(b));
    }
    for source in (m + 1) as NodeLabel..n as NodeLabel {
        let mut targets = HashSet::new();
        while targets.len() < m {
            if let Some(&t) = repeated.choose(rng) {
                targets.insert(t);
            }
        }
        let mut targets: Vec<_> = targets.into_iter().collect();
        targets.sort_unstable();
        for &t in &targets {
            graph.add_edge(source, t);
            repeated.push(t);
            repeated.push(source);
        }
    }
    Ok(graph)
}

/// Small-world ring lattice: each node joined to its `k / 2` neighbors on
/// each side, then every lattice edge rewired with probability `p`.
pub fn watts_strogatz<R: Rng>(
    n: usize,
    k: usize,
    p: f64,
    rng: &mut R,
) -> Result<Graph, GraphError> {
    check_probability(p)?;
    if k > n {
        return Err(GraphError::invalid_parameter(format!(
            "watts_strogatz requires k <= n, got k={k}, n={n}"
        )));
    }
    if k == n {
        return Ok(complete(n));
    }
    let mut graph = with_nodes(n);
    for offset in 1..=k / 2 {
        for u in 0..n {
            graph.add_edge(u as NodeLabel, ((u + offset) % n) as NodeLabel);
        }
    }
    for offset in 1..=k / 2 {
        for u in 0..n {
            let v = (u + offset) % n;
            if !rng.gen_bool(p) {
                continue;
            }
            let (u_idx, v_idx) = (GraphNodeIdx::from(u), GraphNodeIdx::from(v));
            if graph.degree(u_idx) >= n - 1 || !graph.has_edge(u_idx, v_idx) {
                continue;
            }
            let mut w = GraphNodeIdx::from(rng.gen_range(0..n));
            while w == u_idx || graph.has_edge(u_idx, w) {
                w = GraphNodeIdx::from(rng.gen_range(0..n));
            }
            graph.remove_edge(u_idx, v_idx);
            graph.add_edge(u as NodeLabel, graph.label(w));
        }
    }
    Ok(graph)
}

/// Complete graph on `n` nodes.
#[must_use]
pub fn complete(n: usize) -> Graph {
    let mut graph = with_nodes(n);
    for a in 0..n as NodeLabel {
        for b in (a + 1)..n as NodeLabel {
            graph.add_edge(a, b);
        }
    }
    graph
}

/// Random bipartite graph: left side `0..m`, right side `m..m + n`, each
/// cross pair joined with probability `p`.
pub fn random_bipartite<R: Rng>(
    m: usize,
    n: usize,
    p: f64,
    rng: &mut R,
) -> Result<Graph, GraphError> {
    check_probability(p)?;
    let mut graph = with_nodes(m + n);
    for a in 0..m as NodeLabel {
        for b in m as NodeLabel..(m + n) as NodeLabel {
            if rng.gen_bool(p) {
                graph.add_edge(a, b);
            }
        }
    }
    Ok(graph)
}

/// Uniformly random labelled tree on `k` nodes, decoded from a random
/// Prüfer sequence.
pub fn random_tree<R: Rng>(k: usize, rng: &mut R) -> Result<Graph, GraphError> {
    if k == 0 {
        return Err(GraphError::invalid_parameter("random_tree requires k >= 1"));
    }
    if k <= 2 {
        return Ok(path(k));
    }
    let sequence: Vec<usize> = (0..k - 2).map(|_| rng.gen_range(0..k)).collect();
    Ok(from_prufer(k, &sequence))
}

fn from_prufer(k: usize, sequence: &[usize]) -> Graph {
    let mut graph = with_nodes(k);
    let mut degree = vec![1usize; k];
    for &x in sequence {
        degree[x] += 1;
    }
    let mut leaves: BinaryHeap<Reverse<usize>> = (0..k)
        .filter(|&v| degree[v] == 1)
        .map(Reverse)
        .collect();
    for &x in sequence {
        let Some(Reverse(leaf)) = leaves.pop() else {
            break;
        };
        graph.add_edge(leaf as NodeLabel, x as NodeLabel);
        degree[x] -= 1;
        if degree[x] == 1 {
            leaves.push(Reverse(x));
        }
    }
    if let (Some(Reverse(a)), Some(Reverse(b))) = (leaves.pop(), leaves.pop()) {
        graph.add_edge(a as NodeLabel, b as NodeLabel);
    }
    graph
}

/// Path `0 - 1 - ... - (n-1)`.
#[must_use]
pub fn path(n: usize) -> Graph {
    let mut graph = with_nodes(n);
    for a in 1..n as NodeLabel {
        graph.add_edge(a - 1, a);
    }
    graph
}

/// Star with center `0` and leaves `1..n`.
#[must_use]
pub fn star(n: usize) -> Graph {
    let mut graph = with_nodes(n);
    for leaf in 1..n as NodeLabel {
        graph.add_edge(0, leaf);
    }
    graph
}

/// Randomly permutes node labels, keeping the structure. Nodes of the
/// result are indexed in ascending label order, so dense indices move with
/// the labels.
pub fn relabel_shuffled<R: Rng>(graph: &Graph, rng: &mut R) -> Graph {
    let mut labels: Vec<NodeLabel> = graph.nodes().map(|n| graph.label(n)).collect();
    labels.shuffle(rng);
    let mut ordered = labels.clone();
    ordered.sort_unstable();
    let mut out = Graph::new();
    for label in ordered {
        out.add_node(label);
    }
    for (a, b) in graph.edges() {
        out.add_edge(labels[a.as_usize()], labels[b.as_usize()]);
    }
    out
}
