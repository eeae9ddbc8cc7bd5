//! Registry translating external node labels to dense graph indices.
//!
//! Input files and generators name nodes with arbitrary (possibly sparse)
//! integers. The search kernels index per-node tables by position, so every
//! label is assigned a [`GraphNodeIdx`] in insertion order.

use contracts::*;
use std::collections::HashMap;
use std::fmt;

/// External integer id of a node, as written in edge-list files.
pub type NodeLabel = u64;

/// Dense position of a node inside a [`Graph`](super::Graph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphNodeIdx(u32);

impl GraphNodeIdx {
    /// Wraps a raw position.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the position for slice indexing.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GraphNodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for GraphNodeIdx {
    #[inline]
    fn from(raw: usize) -> Self {
        Self(raw as u32)
    }
}

/// Bidirectional label <-> index map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeRegistry {
    /// Labels in insertion order; position is the node index.
    labels: Vec<NodeLabel>,
    /// Reverse lookup from label to index.
    index_of: HashMap<NodeLabel, GraphNodeIdx>,
}

impl NodeRegistry {
    /// Returns the index of `label`, registering it if unseen.
    #[debug_ensures(self.labels.len() == self.index_of.len())]
    pub fn intern(&mut self, label: NodeLabel) -> (GraphNodeIdx, bool) {
        if let Some(&idx) = self.index_of.get(&label) {
            return (idx, false);
        }
        let idx = GraphNodeIdx::from(self.labels.len());
        self.labels.push(label);
        self.index_of.insert(label, idx);
        (idx, true)
    }

    /// Number of registered nodes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of the node at `idx`.
    #[must_use]
    pub fn label(&self, idx: GraphNodeIdx) -> NodeLabel {
        self.labels[idx.as_usize()]
    }

    /// Index of `label`, if registered.
    #[must_use]
    pub fn index_of(&self, label: NodeLabel) -> Option<GraphNodeIdx> {
        self.index_of.get(&label).copied()
    }
}
