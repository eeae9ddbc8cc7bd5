use std::rc::Rc;

use treeiso_common::GraphNodeIdx;

use crate::coloring::ColorSet;
use crate::decomposition::ViewId;

/// Per-trial table `(host node, view id) -> realizable color sets`.
///
/// Dense: one slot per pair, laid out host-major. Entries are sorted and
/// duplicate-free so lookups can binary search. A table is valid for exactly
/// one coloring and must be dropped with its trial.
#[derive(Debug)]
pub struct MemoTable {
    num_views: usize,
    entries: Vec<Option<Rc<[ColorSet]>>>,
    filled: usize,
}

impl MemoTable {
    pub fn new(num_hosts: usize, num_views: usize) -> Self {
        Self {
            num_views,
            entries: vec![None; num_hosts * num_views],
            filled: 0,
        }
    }

    const fn slot(&self, host: GraphNodeIdx, view: ViewId) -> usize {
        host.as_usize() * self.num_views + view.as_usize()
    }

    pub fn get(&self, host: GraphNodeIdx, view: ViewId) -> Option<&Rc<[ColorSet]>> {
        self.entries[self.slot(host, view)].as_ref()
    }

    pub fn insert(&mut self, host: GraphNodeIdx, view: ViewId, sets: Rc<[ColorSet]>) {
        let slot = self.slot(host, view);
        if self.entries[slot].replace(sets).is_none() {
            self.filled += 1;
        }
    }

    /// Number of computed entries.
    pub const fn filled(&self) -> usize {
        self.filled
    }
}
