//! Repeat driver for color coding.
//!
//! Each trial recolors the host graph from its own seed, builds a fresh memo
//! table and scans every host node as a candidate root. The first trial that
//! finds a non-empty color set ends the search. Trial seeds are a pure
//! function of the master seed and the trial number, so the answer does not
//! depend on whether trials run in parallel.

#[cfg(feature = "rayon")]
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};
use treeiso_common::{Graph, GraphNodeIdx};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::color_sets::ColorSetEngine;
use crate::SearchError;
use crate::coloring::{ColorSet, Coloring, MAX_COLORS};
use crate::decomposition::DecompositionTree;
use crate::embedding::Embedding;

/// Derives the seed of trial `trial` from the master seed.
#[must_use]
pub const fn trial_seed(master: u64, trial: usize) -> u64 {
    master.wrapping_add((trial as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// A successful trial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrialHit {
    /// Zero-based trial number.
    pub trial: usize,
    /// Host node the query root was embedded at.
    pub host_root: GraphNodeIdx,
    /// The rainbow color set certifying the embedding.
    pub colors: ColorSet,
    /// Explicit witness reconstructed from the memo table.
    pub embedding: Embedding,
}

/// Result of a full color-coding run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorCodingOutcome {
    /// The first successful trial, if any.
    pub hit: Option<TrialHit>,
    /// Trials started before the search stopped.
    pub trials_run: usize,
}

impl ColorCodingOutcome {
    /// Returns true if an embedding was found.
    #[must_use]
    pub const fn found(&self) -> bool {
        self.hit.is_some()
    }
}

/// Color-coding search of one decomposed query tree in one host graph.
#[derive(Clone, Copy, Debug)]
pub struct ColorCoding<'a> {
    host: &'a Graph,
    tree: &'a DecompositionTree,
}

impl<'a> ColorCoding<'a> {
    /// Prepares a search. Fails if the query has more nodes than colors a
    /// [`ColorSet`] can hold and could still fit in the host. A query larger
    /// than the host is accepted and never found.
    pub fn new(host: &'a Graph, tree: &'a DecompositionTree) -> Result<Self, SearchError> {
        let k = tree.num_nodes();
        if k > MAX_COLORS && k <= host.num_nodes() {
            return Err(SearchError::QueryTooLarge { k, max: MAX_COLORS });
        }
        Ok(Self { host, tree })
    }

    const fn exceeds_host(&self) -> bool {
        self.k() > self.host.num_nodes()
    }

    /// Query size.
    #[must_use]
    pub const fn k(&self) -> usize {
        self.tree.num_nodes()
    }

    /// Runs a single trial. Returns early with `None` once `cancel` is set;
    /// sets it on success.
    pub fn run_trial(
        &self,
        trial: usize,
        master_seed: u64,
        cancel: &AtomicBool,
    ) -> Result<Option<TrialHit>, SearchError> {
        if self.exceeds_host() {
            return Ok(None);
        }
        let mut rng = StdRng::seed_from_u64(trial_seed(master_seed, trial));
        let coloring = Coloring::random(self.host, self.k(), &mut rng);
        let mut engine = ColorSetEngine::new(self.host, self.tree, &coloring);
        let root = self.tree.root_view();

        for host_root in self.host.nodes() {
            if cancel.load(Ordering::Relaxed) {
                return Ok(None);
            }
            let Some(colors) = engine.color_sets(host_root, root)?.first().copied() else {
                continue;
            };
            let embedding = engine.witness(host_root, root, colors).ok_or_else(|| {
                SearchError::internal(format!(
                    "no witness for {colors:?} at {host_root} in trial {trial}"
                ))
            })?;
            cancel.store(true, Ordering::Relaxed);
            debug!(
                "trial {} found {:?} rooted at {} ({} memo entries)",
                trial,
                colors,
                host_root,
                engine.memo_entries()
            );
            return Ok(Some(TrialHit {
                trial,
                host_root,
                colors,
                embedding,
            }));
        }

        debug!(
            "trial {} exhausted ({} memo entries)",
            trial,
            engine.memo_entries()
        );
        Ok(None)
    }

    /// Runs up to `max_trials` trials, stopping at the first success.
    pub fn search(
        &self,
        max_trials: usize,
        master_seed: u64,
        parallel: bool,
    ) -> Result<ColorCodingOutcome, SearchError> {
        if self.exceeds_host() {
            info!(
                "query has {} nodes but host only {}; nothing to search",
                self.k(),
                self.host.num_nodes()
            );
            return Ok(ColorCodingOutcome {
                hit: None,
                trials_run: 0,
            });
        }

        info!(
            "color coding: k={} n={} trials<={} seed={} parallel={}",
            self.k(),
            self.host.num_nodes(),
            max_trials,
            master_seed,
            parallel
        );

        if parallel {
            self.search_parallel(max_trials, master_seed)
        } else {
            self.search_sequential(max_trials, master_seed)
        }
    }

    /// Runs the search and returns the witness of the first successful
    /// trial.
    pub fn find_embedding(
        &self,
        max_trials: usize,
        master_seed: u64,
        parallel: bool,
    ) -> Result<Option<Embedding>, SearchError> {
        Ok(self
            .search(max_trials, master_seed, parallel)?
            .hit
            .map(|hit| hit.embedding))
    }

    fn search_sequential(
        &self,
        max_trials: usize,
        master_seed: u64,
    ) -> Result<ColorCodingOutcome, SearchError> {
        let never = AtomicBool::new(false);
        for trial in 0..max_trials {
            if let Some(hit) = self.run_trial(trial, master_seed, &never)? {
                return Ok(ColorCodingOutcome {
                    hit: Some(hit),
                    trials_run: trial + 1,
                });
            }
        }
        Ok(ColorCodingOutcome {
            hit: None,
            trials_run: max_trials,
        })
    }

    #[cfg(feature = "rayon")]
    fn search_parallel(
        &self,
        max_trials: usize,
        master_seed: u64,
    ) -> Result<ColorCodingOutcome, SearchError> {
        let cancel = AtomicBool::new(false);
        let started = AtomicUsize::new(0);

        let hit = (0..max_trials)
            .into_par_iter()
            .map(|trial| {
                if cancel.load(Ordering::Relaxed) {
                    return Ok(None);
                }
                started.fetch_add(1, Ordering::Relaxed);
                self.run_trial(trial, master_seed, &cancel)
            })
            .find_map_any(Result::transpose)
            .transpose()?;

        Ok(ColorCodingOutcome {
            hit,
            trials_run: started.into_inner(),
        })
    }

    #[cfg(not(feature = "rayon"))]
    fn search_parallel(
        &self,
        max_trials: usize,
        master_seed: u64,
    ) -> Result<ColorCodingOutcome, SearchError> {
        debug!("built without rayon; running trials sequentially");
        self.search_sequential(max_trials, master_seed)
    }
}

/// Decides whether `host` contains the decomposed query tree, running at
/// most `max_trials` sequential trials from `master_seed`.
pub fn find_by_color_coding(
    host: &Graph,
    tree: &DecompositionTree,
    max_trials: usize,
    master_seed: u64,
) -> Result<bool, SearchError> {
    Ok(ColorCoding::new(host, tree)?
        .search(max_trials, master_seed, false)?
        .found())
}

#[cfg(test)]
mod tests {
    use super::*;
    use treeiso_common::generate;

    #[test]
    fn trial_seeds_differ() {
        let seeds: Vec<_> = (0..100).map(|t| trial_seed(42, t)).collect();
        let mut dedup = seeds.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), seeds.len());
        assert_eq!(trial_seed(42, 0), 42);
    }

    #[test]
    fn cancelled_trial_returns_nothing() {
        let host = generate::complete(6);
        let query = generate::path(3);
        let tree = DecompositionTree::build(&query).unwrap();
        let search = ColorCoding::new(&host, &tree).unwrap();
        let cancel = AtomicBool::new(true);
        assert_eq!(search.run_trial(0, 1, &cancel).unwrap(), None);
    }

    #[test]
    fn sequential_hit_reports_trial_count() {
        let host = generate::complete(8);
        let query = generate::star(4);
        let tree = DecompositionTree::build(&query).unwrap();
        let outcome = ColorCoding::new(&host, &tree)
            .unwrap()
            .search(500, 7, false)
            .unwrap();
        let hit = outcome.hit.as_ref().unwrap();
        assert_eq!(outcome.trials_run, hit.trial + 1);
        assert!(hit.embedding.is_valid_for(&host, &query));
        assert_eq!(hit.colors.len(), 4);
    }

    #[test]
    fn find_embedding_is_reproducible() {
        let host = generate::complete(6);
        let query = generate::path(4);
        let tree = DecompositionTree::build(&query).unwrap();
        let search = ColorCoding::new(&host, &tree).unwrap();
        let first = search.find_embedding(300, 5, false).unwrap();
        let second = search.find_embedding(300, 5, false).unwrap();
        assert_eq!(first, second);
        assert!(first.unwrap().is_valid_for(&host, &query));
    }

    #[test]
    fn oversized_query_skips_trials() {
        let host = generate::path(3);
        let query = generate::path(5);
        let tree = DecompositionTree::build(&query).unwrap();
        let outcome = ColorCoding::new(&host, &tree)
            .unwrap()
            .search(1000, 0, false)
            .unwrap();
        assert!(!outcome.found());
        assert_eq!(outcome.trials_run, 0);
    }

    #[test]
    fn rejects_queries_beyond_palette() {
        let host = generate::path(MAX_COLORS + 6);
        let tree = DecompositionTree::build(&generate::path(MAX_COLORS + 1)).unwrap();
        assert!(matches!(
            ColorCoding::new(&host, &tree),
            Err(SearchError::QueryTooLarge { k: 65, max: 64 })
        ));
    }

    #[test]
    fn palette_sized_query_on_small_host_is_not_found() {
        let host = generate::path(3);
        let tree = DecompositionTree::build(&generate::path(MAX_COLORS + 1)).unwrap();
        let search = ColorCoding::new(&host, &tree).unwrap();
        let never = AtomicBool::new(false);
        assert_eq!(search.run_trial(0, 9, &never).unwrap(), None);

        let outcome = search.search(100, 9, true).unwrap();
        assert!(!outcome.found());
        assert_eq!(outcome.trials_run, 0);
        assert!(!find_by_color_coding(&host, &tree, 100, 9).unwrap());
    }
}
