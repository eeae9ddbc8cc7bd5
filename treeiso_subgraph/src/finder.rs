//! Algorithm selection.
//!
//! [`IsomorphismFinder`] validates the query tree, resolves the master seed
//! and dispatches to color coding or brute force according to its
//! [`Config`]. Wall-clock timing is left to callers.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;
use treeiso_common::{Algorithm, Config, Graph};

use crate::SearchError;
use crate::brute_force::BruteForce;
use crate::decomposition::DecompositionTree;
use crate::embedding::Embedding;
use crate::engine::ColorCoding;

/// Everything a single search observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    /// The algorithm that ran.
    pub algorithm: Algorithm,
    /// Whether an embedding was found.
    pub found: bool,
    /// Color-coding trials started, or brute-force subsets examined.
    pub trials: usize,
    /// Witness for a positive answer.
    pub embedding: Option<Embedding>,
    /// Master seed used; `None` for brute force, which draws nothing.
    pub seed: Option<u64>,
}

/// Facade over both search algorithms.
#[derive(Clone, Debug, Default)]
pub struct IsomorphismFinder {
    config: Config,
}

impl IsomorphismFinder {
    /// Creates a finder with the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Decides whether `host` contains `query`.
    pub fn find(&self, host: &Graph, query: &Graph) -> Result<bool, SearchError> {
        Ok(self.search(host, query)?.found)
    }

    /// Like [`find`](Self::find) but returns the witness.
    pub fn find_embedding(
        &self,
        host: &Graph,
        query: &Graph,
    ) -> Result<Option<Embedding>, SearchError> {
        Ok(self.search(host, query)?.embedding)
    }

    /// Runs the configured algorithm and reports what happened.
    pub fn search(&self, host: &Graph, query: &Graph) -> Result<SearchReport, SearchError> {
        if let Some(eps) = self.config.invalid_epsilon() {
            return Err(SearchError::InvalidEpsilon(eps));
        }
        DecompositionTree::validate(query)?;
        let report = match self.config.algorithm {
            Algorithm::ColorCoding => self.color_coding(host, query)?,
            Algorithm::BruteForce => self.brute_force(host, query),
        };
        info!(
            "{}: k={} n={} found={} trials={}",
            report.algorithm,
            query.num_nodes(),
            host.num_nodes(),
            report.found,
            report.trials
        );
        Ok(report)
    }

    fn color_coding(&self, host: &Graph, query: &Graph) -> Result<SearchReport, SearchError> {
        let seed = self.config.seed.unwrap_or_else(|| {
            let drawn = rand::random::<u64>();
            info!("no seed configured, drew {}", drawn);
            drawn
        });
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = DecompositionTree::build_randomized(query, &mut rng)?;
        let budget = self.config.trial_budget(tree.num_nodes());
        info!(
            "color coding budget: {} trials for k={}",
            budget,
            tree.num_nodes()
        );

        let outcome =
            ColorCoding::new(host, &tree)?.search(budget, rng.next_u64(), self.config.parallel)?;
        Ok(SearchReport {
            algorithm: Algorithm::ColorCoding,
            found: outcome.found(),
            trials: outcome.trials_run,
            embedding: outcome.hit.map(|hit| hit.embedding),
            seed: Some(seed),
        })
    }

    fn brute_force(&self, host: &Graph, query: &Graph) -> SearchReport {
        let outcome = BruteForce::new(host, query).search(self.config.parallel);
        SearchReport {
            algorithm: Algorithm::BruteForce,
            found: outcome.embedding.is_some(),
            trials: outcome.combinations_checked,
            embedding: outcome.embedding,
            seed: None,
        }
    }
}

/// Decides whether `graph` contains the tree `tree`, using the algorithm
/// named `algorithm` (`"color_coding"` or `"brute_force"`) with default
/// settings. Any other name is rejected.
pub fn find(graph: &Graph, tree: &Graph, algorithm: &str) -> Result<bool, SearchError> {
    let algorithm: Algorithm = algorithm.parse()?;
    IsomorphismFinder::new(Config::builder().algorithm(algorithm).build()).find(graph, tree)
}

/// Returns a witness embedding of `tree` in `graph`, if one is found.
pub fn find_embedding(
    graph: &Graph,
    tree: &Graph,
    config: &Config,
) -> Result<Option<Embedding>, SearchError> {
    IsomorphismFinder::new(config.clone()).find_embedding(graph, tree)
}
