//! Error types for search operations.
//!
//! User-facing failures (bad algorithm name, malformed query) are raised
//! before any search begins. `LeafSplit` and `Internal` indicate a broken
//! invariant inside the kernel.

use thiserror::Error;
use treeiso_common::{GraphError, UnknownAlgorithm};

use crate::decomposition::ViewId;

/// Errors that can occur during search preparation or execution.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The requested algorithm name is not supported.
    #[error(transparent)]
    UnsupportedAlgorithm(#[from] UnknownAlgorithm),

    /// The query graph is not a tree.
    #[error(
        "Malformed query tree: {nodes} nodes, {edges} edges, connected={connected} \
         (a tree needs edges = nodes - 1 and a single component)"
    )]
    MalformedTree {
        /// Node count of the query graph.
        nodes: usize,
        /// Edge count of the query graph.
        edges: usize,
        /// Whether the query graph has a single component.
        connected: bool,
    },

    /// Color sets are 64-bit masks, so color coding caps the query size.
    #[error("Query tree has {k} nodes; color coding supports at most {max}")]
    QueryTooLarge {
        /// Nodes in the query tree.
        k: usize,
        /// Largest supported query size.
        max: usize,
    },

    /// The configured false-negative target is not a probability in `(0, 1)`.
    #[error("epsilon must lie strictly between 0 and 1, got {0}")]
    InvalidEpsilon(f64),

    /// A split was requested on a single-node subtree view.
    #[error("Internal: cannot split leaf view {0}")]
    LeafSplit(ViewId),

    /// Graph loading or generation failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A kernel invariant did not hold.
    #[error("Internal: {0}")]
    Internal(String),
}

impl SearchError {
    /// Create an internal invariant error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
