//! Exhaustive oracle: every `k`-subset of host nodes, every assignment of
//! query nodes to it.
//!
//! Exact but `O(C(n, k) * k!)`. Used as ground truth for color coding and
//! for small instances where certainty matters more than speed.

use std::sync::atomic::{AtomicUsize, Ordering};

use itertools::Itertools;
use tracing::{debug, info};
use treeiso_common::{Graph, GraphNodeIdx};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::embedding::Embedding;

/// Result of a brute-force scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BruteForceOutcome {
    /// First embedding found, if any.
    pub embedding: Option<Embedding>,
    /// Node subsets examined before the scan stopped.
    pub combinations_checked: usize,
}

/// Brute-force search of `query` in `host`.
#[derive(Debug)]
pub struct BruteForce<'a> {
    host: &'a Graph,
    query: &'a Graph,
    /// Query edges as pairs of query indices.
    query_edges: Vec<(usize, usize)>,
}

impl<'a> BruteForce<'a> {
    /// Prepares a scan; `query` need not be validated.
    #[must_use]
    pub fn new(host: &'a Graph, query: &'a Graph) -> Self {
        let query_edges = query
            .edges()
            .map(|(a, b)| (a.as_usize(), b.as_usize()))
            .collect();
        Self {
            host,
            query,
            query_edges,
        }
    }

    /// Query size.
    #[must_use]
    pub const fn k(&self) -> usize {
        self.query.num_nodes()
    }

    /// Tries every permutation of `combination` as an image of the query
    /// nodes. Query node `i` goes to `combination[perm[i]]`.
    #[must_use]
    pub fn match_combination(&self, combination: &[GraphNodeIdx]) -> Option<Embedding> {
        let k = self.k();
        if self.host.induced_edge_count(combination) < k.saturating_sub(1) {
            return None;
        }
        (0..k)
            .permutations(k)
            .find(|perm| {
                self.query_edges
                    .iter()
                    .all(|&(a, b)| self.host.has_edge(combination[perm[a]], combination[perm[b]]))
            })
            .map(|perm| {
                Embedding::from_pairs(
                    perm.iter()
                        .enumerate()
                        .map(|(q, &slot)| (GraphNodeIdx::from(q), combination[slot]))
                        .collect(),
                )
            })
    }

    /// Scans combinations in lexicographic index order, stopping at the first
    /// match. With `parallel` and the `rayon` feature, combinations are
    /// checked concurrently and whichever match is found first wins.
    #[must_use]
    pub fn search(&self, parallel: bool) -> BruteForceOutcome {
        info!(
            "brute force: k={} n={} parallel={}",
            self.k(),
            self.host.num_nodes(),
            parallel
        );
        let checked = AtomicUsize::new(0);
        let try_one = |combination: Vec<GraphNodeIdx>| {
            let found = self.match_combination(&combination);
            checked.fetch_add(1, Ordering::Relaxed);
            found
        };

        let mut combinations = self.host.nodes().combinations(self.k());

        #[cfg(feature = "rayon")]
        let embedding = if parallel {
            combinations.par_bridge().find_map_any(try_one)
        } else {
            combinations.find_map(try_one)
        };
        #[cfg(not(feature = "rayon"))]
        let embedding = combinations.find_map(try_one);

        let combinations_checked = checked.into_inner();
        debug!(
            "brute force checked {} combinations, found={}",
            combinations_checked,
            embedding.is_some()
        );
        BruteForceOutcome {
            embedding,
            combinations_checked,
        }
    }
}

/// Decides exactly whether `host` contains `query` as a (not necessarily
/// induced) subgraph.
#[must_use]
pub fn find_by_brute_force(host: &Graph, query: &Graph) -> bool {
    BruteForce::new(host, query)
        .search(false)
        .embedding
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use treeiso_common::generate;

    #[test]
    fn star_needs_a_hub() {
        // a path never hosts a star with 3 leaves
        let host = generate::path(6);
        assert!(!find_by_brute_force(&host, &generate::star(4)));
        assert!(find_by_brute_force(&host, &generate::star(3)));
    }

    #[test]
    fn match_combination_respects_order_of_nodes() {
        // host: 0-1-2 plus 2-3 ; query path 0-1-2
        let host = Graph::from_edges([(0, 1), (1, 2), (2, 3)]);
        let query = generate::path(3);
        let bf = BruteForce::new(&host, &query);
        let combo: Vec<_> = [0, 1, 2].into_iter().map(GraphNodeIdx::from).collect();
        let embedding = bf.match_combination(&combo).unwrap();
        assert!(embedding.is_valid_for(&host, &query));

        // {0, 1, 3} induces only one edge
        let sparse: Vec<_> = [0, 1, 3].into_iter().map(GraphNodeIdx::from).collect();
        assert_eq!(bf.match_combination(&sparse), None);
    }

    #[test]
    fn stops_at_first_match() {
        let host = generate::complete(7);
        let query = generate::path(4);
        let outcome = BruteForce::new(&host, &query).search(false);
        assert_eq!(outcome.combinations_checked, 1);
        assert!(outcome.embedding.unwrap().is_valid_for(&host, &query));
    }

    #[test]
    fn oversized_query_has_no_combinations() {
        let host = generate::path(2);
        let outcome = BruteForce::new(&host, &generate::path(3)).search(true);
        assert_eq!(outcome.combinations_checked, 0);
        assert_eq!(outcome.embedding, None);
    }
}
