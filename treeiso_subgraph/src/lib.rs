//! Tree-subgraph isomorphism search.
//!
//! Two procedures decide whether a host [`Graph`] contains a query tree as a
//! (not necessarily induced) subgraph:
//!
//! - color coding ([`ColorCoding`]): randomized, one-sided error. Each trial
//!   colors the host with `k` colors and runs a dynamic program over rainbow
//!   color sets on a fixed [`DecompositionTree`] of the query.
//! - brute force ([`BruteForce`]): every `k`-subset of host nodes, every
//!   permutation. Exact.
//!
//! [`IsomorphismFinder`] picks between them from a [`Config`].
//!
//! ```
//! use treeiso_common::generate;
//! use treeiso_subgraph::find;
//!
//! let host = generate::path(5);
//! let query = generate::path(3);
//! assert!(find(&host, &query, "brute_force").unwrap());
//! ```

mod brute_force;
mod embedding;
mod error;
mod finder;

pub mod coloring;
pub mod decomposition;
pub mod engine;

pub use brute_force::{BruteForce, BruteForceOutcome, find_by_brute_force};
pub use coloring::{ColorSet, Coloring, color_graph};
pub use decomposition::{DecompositionTree, Split, SubtreeView};
pub use embedding::Embedding;
pub use engine::{ColorCoding, ColorCodingOutcome, TrialHit, find_by_color_coding};
pub use error::SearchError;
pub use finder::{IsomorphismFinder, SearchReport, find, find_embedding};

pub use treeiso_common::{Algorithm, Config, Graph};
