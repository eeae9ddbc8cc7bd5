use std::fmt;
use std::ops::Range;

/// Stable identity of a [`SubtreeView`], assigned once when the
/// decomposition is built. Dense in `0..num_views`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u32);

impl ViewId {
    pub(super) const fn new(raw: usize) -> Self {
        Self(raw as u32)
    }

    /// Returns the id for table indexing.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

/// A rooted piece of the query tree: a decomposition node together with a
/// prefix of its children (in split order), each child contributing its
/// whole subtree.
///
/// Views are plain handles into the immutable arena; creating one never
/// copies tree structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubtreeView {
    pub(super) id: ViewId,
    /// Arena index of the root decomposition node.
    pub(super) node: u32,
    /// How many children of `node` are still attached.
    pub(super) kept: u32,
}

impl SubtreeView {
    /// Stable identity, used as the memo key.
    #[must_use]
    pub const fn id(self) -> ViewId {
        self.id
    }

    /// Number of children still attached to the root.
    #[must_use]
    pub const fn attached_children(self) -> usize {
        self.kept as usize
    }

    /// A view is a leaf when its root has no attached children.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        self.kept == 0
    }
}

/// Result of detaching one child subtree from a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Split {
    /// The original root with every child except the detached one.
    pub stay: SubtreeView,
    /// The detached child subtree, rooted at the child.
    pub split_off: SubtreeView,
}

/// Cached node set of a view: a contiguous range of preorder positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeSet {
    pub(super) start: usize,
    pub(super) len: usize,
}

impl NodeSet {
    /// Number of query nodes in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.len
    }

    /// Node sets of views are never empty; kept for API symmetry.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Preorder positions covered by this set.
    #[must_use]
    pub const fn positions(self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// Returns true if the two sets share no node.
    #[must_use]
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.start + self.len <= other.start || other.start + other.len <= self.start
    }

    /// Returns true if `self` and `other` are disjoint and together cover
    /// exactly `whole`.
    #[must_use]
    pub const fn partitions(self, other: Self, whole: Self) -> bool {
        let (lo, hi) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        lo.start == whole.start && lo.start + lo.len == hi.start && lo.len + hi.len == whole.len
    }
}
