//! Random node coloring and color sets.
//!
//! A [`Coloring`] is trial-local: each trial draws a fresh one from its own
//! seeded generator, so concurrent trials never share mutable state and the
//! host graph stays read-only.

use std::fmt;

use rand::Rng;
use treeiso_common::{Graph, GraphNodeIdx};

/// A color in `0..k`.
pub type Color = u8;

/// Largest query size representable by a [`ColorSet`].
pub const MAX_COLORS: usize = u64::BITS as usize;

/// A set of colors, stored as a 64-bit mask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorSet(u64);

impl ColorSet {
    /// The set `{color}`.
    #[must_use]
    pub const fn singleton(color: Color) -> Self {
        Self(1 << color)
    }

    /// Number of colors in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if `color` is in the set.
    #[must_use]
    pub const fn contains(self, color: Color) -> bool {
        self.0 & (1 << color) != 0
    }

    /// Returns true if no color appears in both sets.
    #[must_use]
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    /// Returns true if every color of `self` is in `other`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Set union.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Colors of `self` not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Colors in increasing order.
    pub fn iter(self) -> impl Iterator<Item = Color> {
        (0..MAX_COLORS as u8).filter(move |&c| self.contains(c))
    }
}

impl fmt::Debug for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |acc, c| acc.union(Self::singleton(c)))
    }
}

/// Total map host node -> color for one trial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coloring {
    colors: Vec<Color>,
}

impl Coloring {
    /// Draws an independent uniform color in `0..k` for every host node.
    pub fn random<R: Rng + ?Sized>(graph: &Graph, k: usize, rng: &mut R) -> Self {
        debug_assert!((1..=MAX_COLORS).contains(&k));
        let colors = graph
            .nodes()
            .map(|_| rng.gen_range(0..k) as Color)
            .collect();
        Self { colors }
    }

    /// Uses explicit colors from the palette `0..k`, one per host node in
    /// index order.
    #[must_use]
    pub fn from_colors(colors: Vec<Color>, k: usize) -> Self {
        debug_assert!(colors.iter().all(|&c| (c as usize) < k));
        Self { colors }
    }

    /// Color of `node`.
    #[must_use]
    pub fn color(&self, node: GraphNodeIdx) -> Color {
        self.colors[node.as_usize()]
    }

    /// Number of colored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if no node is colored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Colors every node of `graph` uniformly from `0..k`.
pub fn color_graph<R: Rng + ?Sized>(graph: &Graph, k: usize, rng: &mut R) -> Coloring {
    Coloring::random(graph, k, rng)
}
