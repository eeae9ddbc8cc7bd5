//! Rooted decomposition of the query tree.
//!
//! The query tree is rooted once and laid out as an immutable arena of
//! decomposition nodes. Every recursive sub-problem of color coding is a
//! [`SubtreeView`]: a node plus a prefix of its children. There are exactly
//! `2k - 1` distinct views and each gets a permanent [`ViewId`] at build
//! time, so memo tables can key on it directly.
//!
//! Children are numbered in preorder in their split order, which makes the
//! node set of every view a contiguous preorder range. Splitting detaches the
//! last attached child: both halves are again views, found by arithmetic on
//! the arena (no copying).

mod view;

pub use view::{NodeSet, Split, SubtreeView, ViewId};

use std::collections::VecDeque;

use contracts::*;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;
use treeiso_common::{Graph, GraphNodeIdx};

use crate::SearchError;

const UNVISITED: u32 = u32::MAX;

#[derive(Clone, Debug)]
struct DecompNode {
    /// Query-tree node this decomposition node stands for.
    label: GraphNodeIdx,
    parent: Option<u32>,
    /// Arena indices of the children, in split order.
    children: Vec<u32>,
    /// Position of `label` in the preorder layout.
    preorder: usize,
    /// `kept_sizes[m]` = size of this node with its first `m` children.
    kept_sizes: Vec<usize>,
    /// Id of the view with zero children attached; `view_base + m` is the
    /// view with `m` children attached.
    view_base: usize,
}

impl DecompNode {
    const fn new(label: GraphNodeIdx, parent: Option<u32>) -> Self {
        Self {
            label,
            parent,
            children: Vec::new(),
            preorder: 0,
            kept_sizes: Vec::new(),
            view_base: 0,
        }
    }
}

/// Immutable rooted decomposition of a query tree, shared read-only by all
/// trials.
#[derive(Clone, Debug)]
pub struct DecompositionTree {
    nodes: Vec<DecompNode>,
    /// Query nodes in preorder.
    preorder: Vec<GraphNodeIdx>,
    /// Query node index -> preorder position.
    position_of: Vec<usize>,
    num_views: usize,
}

impl DecompositionTree {
    /// Roots the tree at its first node and keeps children in breadth-first
    /// discovery order.
    pub fn build(tree: &Graph) -> Result<Self, SearchError> {
        Self::validate(tree)?;
        Ok(Self::from_root(tree, GraphNodeIdx::new(0), |_| {}))
    }

    /// Roots the tree at a random node and shuffles every child list, so the
    /// child detached by each split is uniformly random. The choices are
    /// made once here and stay fixed for the lifetime of the structure.
    pub fn build_randomized<R: Rng>(tree: &Graph, rng: &mut R) -> Result<Self, SearchError> {
        Self::validate(tree)?;
        let root = GraphNodeIdx::from(rng.gen_range(0..tree.num_nodes()));
        Ok(Self::from_root(tree, root, |children| children.shuffle(rng)))
    }

    /// Fails with [`SearchError::MalformedTree`] unless `tree` is a
    /// non-empty tree.
    pub fn validate(tree: &Graph) -> Result<(), SearchError> {
        if tree.is_tree() {
            return Ok(());
        }
        Err(SearchError::MalformedTree {
            nodes: tree.num_nodes(),
            edges: tree.num_edges(),
            connected: tree.is_connected(),
        })
    }

    fn from_root(
        tree: &Graph,
        root: GraphNodeIdx,
        mut order_children: impl FnMut(&mut Vec<u32>),
    ) -> Self {
        let n = tree.num_nodes();

        // 1. BFS: parent/child links mirroring the traversal tree
        let mut nodes = Vec::with_capacity(n);
        let mut arena_of = vec![UNVISITED; n];
        nodes.push(DecompNode::new(root, None));
        arena_of[root.as_usize()] = 0;
        let mut queue = VecDeque::from([0u32]);
        while let Some(current) = queue.pop_front() {
            let label = nodes[current as usize].label;
            for &next in tree.neighbors(label) {
                if arena_of[next.as_usize()] != UNVISITED {
                    continue;
                }
                let idx = nodes.len() as u32;
                arena_of[next.as_usize()] = idx;
                nodes.push(DecompNode::new(next, Some(current)));
                nodes[current as usize].children.push(idx);
                queue.push_back(idx);
            }
        }
        for node in &mut nodes {
            order_children(&mut node.children);
        }

        // 2. Subtree sizes bottom-up (BFS order puts children after parents)
        let mut size = vec![1usize; n];
        for idx in (0..n).rev() {
            size[idx] += nodes[idx]
                .children
                .iter()
                .map(|&c| size[c as usize])
                .sum::<usize>();
        }

        // 3. Prefix sizes and view ids
        let mut num_views = 0;
        for node in &mut nodes {
            let mut acc = 1;
            node.kept_sizes.push(acc);
            for &child in &node.children {
                acc += size[child as usize];
                node.kept_sizes.push(acc);
            }
            node.view_base = num_views;
            num_views += node.children.len() + 1;
        }

        // 4. Preorder layout following split order
        let mut preorder = Vec::with_capacity(n);
        let mut position_of = vec![0; n];
        let mut stack = vec![0u32];
        while let Some(idx) = stack.pop() {
            let node = &mut nodes[idx as usize];
            node.preorder = preorder.len();
            position_of[node.label.as_usize()] = preorder.len();
            preorder.push(node.label);
            stack.extend(node.children.iter().rev().copied());
        }

        debug!(
            "decomposition built: root={} nodes={} views={}",
            root, n, num_views
        );

        Self {
            nodes,
            preorder,
            position_of,
            num_views,
        }
    }

    /// Number of query-tree nodes (`k`).
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.preorder.len()
    }

    /// Number of distinct views; every [`ViewId`] is below this.
    #[must_use]
    pub const fn num_views(&self) -> usize {
        self.num_views
    }

    fn view(&self, node: u32, kept: usize) -> SubtreeView {
        SubtreeView {
            id: ViewId::new(self.nodes[node as usize].view_base + kept),
            node,
            kept: kept as u32,
        }
    }

    fn full_view(&self, node: u32) -> SubtreeView {
        self.view(node, self.nodes[node as usize].children.len())
    }

    /// The whole query tree.
    #[must_use]
    pub fn root_view(&self) -> SubtreeView {
        self.full_view(0)
    }

    /// Query-tree node at the root of `view`.
    #[must_use]
    pub fn root_label(&self, view: SubtreeView) -> GraphNodeIdx {
        self.nodes[view.node as usize].label
    }

    /// Query-tree node the root of `view` hangs from, if any.
    #[must_use]
    pub fn parent_label(&self, view: SubtreeView) -> Option<GraphNodeIdx> {
        self.nodes[view.node as usize]
            .parent
            .map(|p| self.nodes[p as usize].label)
    }

    /// Cached node set of `view`.
    #[must_use]
    pub fn node_set(&self, view: SubtreeView) -> NodeSet {
        let node = &self.nodes[view.node as usize];
        NodeSet {
            start: node.preorder,
            len: node.kept_sizes[view.attached_children()],
        }
    }

    /// Number of query nodes in `view`.
    #[must_use]
    pub fn size(&self, view: SubtreeView) -> usize {
        self.node_set(view).len()
    }

    /// Query nodes covered by `view`, in preorder.
    #[must_use]
    pub fn members(&self, view: SubtreeView) -> &[GraphNodeIdx] {
        &self.preorder[self.node_set(view).positions()]
    }

    /// Membership test in O(1).
    #[must_use]
    pub fn contains(&self, view: SubtreeView, query_node: GraphNodeIdx) -> bool {
        self.node_set(view)
            .positions()
            .contains(&self.position_of[query_node.as_usize()])
    }

    /// Full subtrees of the children attached to `view`.
    pub fn child_views(&self, view: SubtreeView) -> impl Iterator<Item = SubtreeView> + '_ {
        self.nodes[view.node as usize].children[..view.attached_children()]
            .iter()
            .map(|&c| self.full_view(c))
    }

    /// Detaches the last attached child of `view`.
    ///
    /// `stay` keeps the root and the remaining children, `split_off` is the
    /// detached child's full subtree. Their node sets partition the node set
    /// of `view`. Leaf views cannot be split.
    #[debug_ensures(ret.as_ref().map_or(true, |s| self.node_set(s.stay).partitions(
        self.node_set(s.split_off),
        self.node_set(view),
    )))]
    pub fn split(&self, view: SubtreeView) -> Result<Split, SearchError> {
        if view.is_leaf() {
            return Err(SearchError::LeafSplit(view.id()));
        }
        let kept = view.attached_children();
        let child = self.nodes[view.node as usize].children[kept - 1];
        Ok(Split {
            stay: self.view(view.node, kept - 1),
            split_off: self.full_view(child),
        })
    }
}
