//! Witness mappings from query-tree nodes to host nodes.

use std::collections::HashSet;

use treeiso_common::{Graph, GraphNodeIdx, NodeLabel};

/// A concrete embedding proving a positive answer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Embedding {
    /// `(query node, host node)` pairs sorted by query node.
    pairs: Vec<(GraphNodeIdx, GraphNodeIdx)>,
}

impl Embedding {
    /// Builds an embedding from unordered `(query, host)` pairs.
    #[must_use]
    pub fn from_pairs(mut pairs: Vec<(GraphNodeIdx, GraphNodeIdx)>) -> Self {
        pairs.sort_unstable();
        Self { pairs }
    }

    /// Number of mapped query nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Host node assigned to `query_node`.
    #[must_use]
    pub fn host_of(&self, query_node: GraphNodeIdx) -> Option<GraphNodeIdx> {
        self.pairs
            .binary_search_by_key(&query_node, |&(q, _)| q)
            .ok()
            .map(|pos| self.pairs[pos].1)
    }

    /// `(query node, host node)` pairs sorted by query node.
    #[must_use]
    pub fn pairs(&self) -> &[(GraphNodeIdx, GraphNodeIdx)] {
        &self.pairs
    }

    /// The mapping expressed in external labels.
    #[must_use]
    pub fn labelled(&self, host: &Graph, query: &Graph) -> Vec<(NodeLabel, NodeLabel)> {
        self.pairs
            .iter()
            .map(|&(q, h)| (query.label(q), host.label(h)))
            .collect()
    }

    /// Checks that every query node is mapped to a distinct host node and
    /// that every query edge lands on a host edge.
    #[must_use]
    pub fn is_valid_for(&self, host: &Graph, query: &Graph) -> bool {
        if self.pairs.len() != query.num_nodes() {
            return false;
        }
        if !self
            .pairs
            .iter()
            .enumerate()
            .all(|(i, &(q, h))| q.as_usize() == i && h.as_usize() < host.num_nodes())
        {
            return false;
        }
        let distinct: HashSet<GraphNodeIdx> = self.pairs.iter().map(|&(_, h)| h).collect();
        if distinct.len() != self.pairs.len() {
            return false;
        }
        query
            .edges()
            .all(|(a, b)| host.has_edge(self.pairs[a.as_usize()].1, self.pairs[b.as_usize()].1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treeiso_common::generate;

    fn idx(i: usize) -> GraphNodeIdx {
        GraphNodeIdx::from(i)
    }

    #[test]
    fn valid_and_invalid_witnesses() {
        let host = generate::path(4);
        let query = generate::path(3);

        let good = Embedding::from_pairs(vec![(idx(2), idx(3)), (idx(0), idx(1)), (idx(1), idx(2))]);
        assert!(good.is_valid_for(&host, &query));
        assert_eq!(good.host_of(idx(2)), Some(idx(3)));
        assert_eq!(good.labelled(&host, &query), vec![(0, 1), (1, 2), (2, 3)]);

        // 0 -> 0, 1 -> 2: no host edge 0-2
        let broken = Embedding::from_pairs(vec![(idx(0), idx(0)), (idx(1), idx(2)), (idx(2), idx(3))]);
        assert!(!broken.is_valid_for(&host, &query));

        // not injective
        let folded = Embedding::from_pairs(vec![(idx(0), idx(1)), (idx(1), idx(2)), (idx(2), idx(1))]);
        assert!(!folded.is_valid_for(&host, &query));

        let partial = Embedding::from_pairs(vec![(idx(0), idx(1)), (idx(1), idx(2))]);
        assert!(!partial.is_valid_for(&host, &query));
    }
}
