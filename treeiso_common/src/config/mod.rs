//! Configuration for the subtree isomorphism search.
//!
//! This module exposes a small, stable surface for consumers (for example,
//! the `treeiso_cli` crate) to parameterize how a search should behave.
//!
//! The main knobs are:
//! - algorithm: color coding (randomized, one-sided error) or brute force
//!   (exact, exponential).
//! - seed: the master seed all randomness is derived from.
//! - max_trials / epsilon: the color-coding trial budget.
//!
//! Quick examples
//!
//! Default color coding with a fixed seed:
//! ```
//! use treeiso_common::Config;
//! let cfg = Config::builder().seed(123).build();
//! ```
//!
//! Brute force, sequential:
//! ```
//! use treeiso_common::{Algorithm, Config};
//! let cfg = Config::builder()
//!     .algorithm(Algorithm::BruteForce)
//!     .parallel(false)
//!     .build();
//! ```
//!
//! Color coding with false-negative probability below 1%:
//! ```
//! use treeiso_common::Config;
//! let cfg = Config::builder().epsilon(0.01).build();
//! assert_eq!(cfg.trial_budget(3), 21 * 5);
//! ```

mod algorithm;

pub use algorithm::{Algorithm, UnknownAlgorithm};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Global search configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Which search procedure to run.
    pub algorithm: Algorithm,
    /// Master seed. `None` draws one from OS entropy at search time.
    pub seed: Option<u64>,
    /// Explicit trial budget. `None` means `ceil(e^k)`.
    pub max_trials: Option<usize>,
    /// Target false-negative probability; scales the budget by `ceil(ln(1/eps))`.
    pub epsilon: Option<f64>,
    /// Run trials / combinations on the rayon pool when available.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::ColorCoding,
            seed: None,
            max_trials: None,
            epsilon: None,
            parallel: true,
        }
    }
}

impl Config {
    /// Starts a builder from the default configuration.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Number of color-coding trials for a query tree on `k` nodes.
    ///
    /// `ceil(e^k)` trials bound the false-negative probability by `1/e`;
    /// repeating that `ceil(ln(1/eps))` times brings it below `eps`.
    /// An `epsilon` outside `(0, 1)` is ignored with a warning.
    #[must_use]
    pub fn trial_budget(&self, k: usize) -> usize {
        let base = self
            .max_trials
            .unwrap_or_else(|| default_trials(k));
        if let Some(eps) = self.invalid_epsilon() {
            warn!("ignoring epsilon {} outside (0, 1)", eps);
        }
        let factor = self
            .epsilon
            .filter(|&eps| is_probability(eps))
            .map_or(1, |eps| (1.0 / eps).ln().ceil().max(1.0) as usize);
        base.saturating_mul(factor)
    }

    /// The configured `epsilon` if it is not a probability in `(0, 1)`.
    #[must_use]
    pub fn invalid_epsilon(&self) -> Option<f64> {
        self.epsilon.filter(|&eps| !is_probability(eps))
    }
}

const fn is_probability(eps: f64) -> bool {
    eps > 0.0 && eps < 1.0
}

/// `ceil(e^k)`, saturating for very large `k`.
#[must_use]
pub fn default_trials(k: usize) -> usize {
    let trials = (k as f64).exp().ceil();
    if trials >= usize::MAX as f64 {
        usize::MAX
    } else {
        trials as usize
    }
}

/// Fluent builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Selects the search procedure.
    #[must_use]
    pub const fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    /// Shorthand for `algorithm(Algorithm::BruteForce)`.
    #[must_use]
    pub const fn brute_force(self) -> Self {
        self.algorithm(Algorithm::BruteForce)
    }

    /// Fixes the master seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Overrides the `ceil(e^k)` trial budget.
    #[must_use]
    pub const fn max_trials(mut self, trials: usize) -> Self {
        self.config.max_trials = Some(trials);
        self
    }

    /// Sets an optional trial budget.
    #[must_use]
    pub const fn maybe_max_trials(mut self, trials: Option<usize>) -> Self {
        self.config.max_trials = trials;
        self
    }

    /// Targets a false-negative probability below `eps`.
    #[must_use]
    pub const fn epsilon(mut self, eps: f64) -> Self {
        self.config.epsilon = Some(eps);
        self
    }

    /// Enables or disables parallel execution.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_is_ceil_exp_k() {
        let cfg = Config::default();
        assert_eq!(cfg.trial_budget(1), 3);
        assert_eq!(cfg.trial_budget(3), 21);
        assert_eq!(cfg.trial_budget(5), 149);
    }

    #[test]
    fn explicit_budget_wins() {
        let cfg = Config::builder().max_trials(4).build();
        assert_eq!(cfg.trial_budget(10), 4);
    }

    #[test]
    fn epsilon_scales_budget() {
        let cfg = Config::builder().max_trials(10).epsilon(0.001).build();
        // ln(1000) = 6.9
        assert_eq!(cfg.trial_budget(3), 70);
        let ignored = Config::builder().max_trials(10).epsilon(1.5).build();
        assert_eq!(ignored.trial_budget(3), 10);
    }

    #[test]
    fn epsilon_outside_unit_interval_is_flagged() {
        for eps in [0.0, 1.0, 5.0, -0.1, f64::NAN] {
            let cfg = Config::builder().epsilon(eps).build();
            assert!(cfg.invalid_epsilon().is_some(), "eps={eps}");
        }
        assert_eq!(Config::builder().epsilon(0.05).build().invalid_epsilon(), None);
        assert_eq!(Config::default().invalid_epsilon(), None);
    }

    #[test]
    fn huge_k_saturates() {
        assert_eq!(default_trials(10_000), usize::MAX);
    }

    #[test]
    fn json_roundtrip() {
        let cfg = Config::builder().brute_force().seed(9).parallel(false).build();
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"brute_force\""));
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
