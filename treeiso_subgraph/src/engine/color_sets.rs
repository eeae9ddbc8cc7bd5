//! Dynamic program over color sets.
//!
//! `color_sets(v, D)` is the set of rainbow color sets of size `|D|` that
//! some embedding of view `D` rooted at host node `v` receives under the
//! current coloring. It is computed by splitting `D` into `stay` (rooted at
//! `v`) and `split_off` (rooted at a neighbor of `v`) and combining every
//! disjoint pair of their color sets.

use std::rc::Rc;

use tracing::trace;
use treeiso_common::{Graph, GraphNodeIdx};

use super::memo::MemoTable;
use crate::SearchError;
use crate::coloring::{ColorSet, Coloring};
use crate::decomposition::{DecompositionTree, SubtreeView};
use crate::embedding::Embedding;

/// One trial's worth of color-set computation: a fixed coloring plus its
/// private memo table.
#[derive(Debug)]
pub struct ColorSetEngine<'a> {
    host: &'a Graph,
    tree: &'a DecompositionTree,
    coloring: &'a Coloring,
    memo: MemoTable,
}

impl<'a> ColorSetEngine<'a> {
    /// Creates an engine with an empty memo table.
    #[must_use]
    pub fn new(host: &'a Graph, tree: &'a DecompositionTree, coloring: &'a Coloring) -> Self {
        debug_assert_eq!(coloring.len(), host.num_nodes());
        Self {
            host,
            tree,
            coloring,
            memo: MemoTable::new(host.num_nodes(), tree.num_views()),
        }
    }

    /// All realizable rainbow color sets of `view` rooted at `host_node`,
    /// sorted and deduplicated. Empty means no colorful embedding exists.
    pub fn color_sets(
        &mut self,
        host_node: GraphNodeIdx,
        view: SubtreeView,
    ) -> Result<Rc<[ColorSet]>, SearchError> {
        if let Some(hit) = self.memo.get(host_node, view.id()) {
            return Ok(Rc::clone(hit));
        }

        let sets: Rc<[ColorSet]> = if view.is_leaf() {
            Rc::from([ColorSet::singleton(self.coloring.color(host_node))].as_slice())
        } else {
            self.combine(host_node, view)?.into()
        };

        self.memo.insert(host_node, view.id(), Rc::clone(&sets));
        Ok(sets)
    }

    fn combine(
        &mut self,
        host_node: GraphNodeIdx,
        view: SubtreeView,
    ) -> Result<Vec<ColorSet>, SearchError> {
        let host = self.host;
        let split = self.tree.split(view)?;

        let stay_sets = self.color_sets(host_node, split.stay)?;
        let mut out = Vec::new();
        if stay_sets.is_empty() {
            return Ok(out);
        }

        for &neighbor in host.neighbors(host_node) {
            let off_sets = self.color_sets(neighbor, split.split_off)?;
            for &c1 in stay_sets.iter() {
                out.extend(
                    off_sets
                        .iter()
                        .filter(|c2| c1.is_disjoint(**c2))
                        .map(|&c2| c1.union(c2)),
                );
            }
        }

        out.sort_unstable();
        out.dedup();
        trace!(
            "{} @ {}: {} color sets of size {}",
            view.id(),
            host_node,
            out.len(),
            self.tree.size(view)
        );
        Ok(out)
    }

    /// Number of memo entries computed so far.
    #[must_use]
    pub const fn memo_entries(&self) -> usize {
        self.memo.filled()
    }

    /// Reconstructs an embedding of `view` rooted at `host_node` whose nodes
    /// carry exactly `colors`, walking the splits backwards through the memo
    /// table. `colors` must come from an earlier
    /// [`color_sets`](Self::color_sets) call on the same pair.
    #[must_use]
    pub fn witness(
        &self,
        host_node: GraphNodeIdx,
        view: SubtreeView,
        colors: ColorSet,
    ) -> Option<Embedding> {
        let mut pairs = Vec::with_capacity(self.tree.size(view));
        self.collect_witness(host_node, view, colors, &mut pairs)
            .then(|| Embedding::from_pairs(pairs))
    }

    fn collect_witness(
        &self,
        host_node: GraphNodeIdx,
        view: SubtreeView,
        colors: ColorSet,
        out: &mut Vec<(GraphNodeIdx, GraphNodeIdx)>,
    ) -> bool {
        if view.is_leaf() {
            if colors != ColorSet::singleton(self.coloring.color(host_node)) {
                return false;
            }
            out.push((self.tree.root_label(view), host_node));
            return true;
        }

        let Ok(split) = self.tree.split(view) else {
            return false;
        };
        let Some(stay_sets) = self.memo.get(host_node, split.stay.id()) else {
            return false;
        };

        for &c1 in stay_sets.iter().filter(|c1| c1.is_subset(colors)) {
            let c2 = colors.difference(c1);
            for &neighbor in self.host.neighbors(host_node) {
                let realizable = self
                    .memo
                    .get(neighbor, split.split_off.id())
                    .is_some_and(|sets| sets.binary_search(&c2).is_ok());
                if !realizable {
                    continue;
                }
                let mark = out.len();
                if self.collect_witness(host_node, split.stay, c1, out)
                    && self.collect_witness(neighbor, split.split_off, c2, out)
                {
                    return true;
                }
                out.truncate(mark);
            }
        }
        false
    }
}
