//! The standard dataset: which generators run with which parameters, and
//! where their edge lists go.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use treeiso_common::{Graph, GraphError, generate};

/// One generator invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GraphRecipe {
    WattsStrogatz { n: usize, k: usize, p: f64 },
    BarabasiAlbert { n: usize, m: usize },
    ErdosRenyi { n: usize, p: f64 },
    RandomTree { k: usize },
    Complete { n: usize },
    RandomBipartite { m: usize, n: usize, p: f64 },
}

impl GraphRecipe {
    /// Generator name, also the dataset sub-directory.
    pub const fn generator(&self) -> &'static str {
        match self {
            Self::WattsStrogatz { .. } => "watts_strogatz_graph",
            Self::BarabasiAlbert { .. } => "barabasi_albert_graph",
            Self::ErdosRenyi { .. } => "erdos_renyi_graph",
            Self::RandomTree { .. } => "random_tree",
            Self::Complete { .. } => "complete_graph",
            Self::RandomBipartite { .. } => "random_bipartite",
        }
    }

    fn params(&self) -> Vec<String> {
        match *self {
            Self::WattsStrogatz { n, k, p } => vec![n.to_string(), k.to_string(), p.to_string()],
            Self::BarabasiAlbert { n, m } => vec![n.to_string(), m.to_string()],
            Self::ErdosRenyi { n, p } => vec![n.to_string(), p.to_string()],
            Self::RandomTree { k } => vec![k.to_string()],
            Self::Complete { n } => vec![n.to_string()],
            Self::RandomBipartite { m, n, p } => vec![m.to_string(), n.to_string(), p.to_string()],
        }
    }

    /// `<generator>_<params>_<seed>`, used both as file stem and CSV label.
    pub fn name(&self, seed: u64) -> String {
        let mut parts = vec![self.generator().to_string()];
        parts.extend(self.params());
        parts.push(seed.to_string());
        parts.join("_")
    }

    /// `root/<generator>/<name>.edgelist`
    pub fn path_in(&self, root: &Path, seed: u64) -> PathBuf {
        root.join(self.generator())
            .join(format!("{}.edgelist", self.name(seed)))
    }

    /// Runs the generator from a fresh generator seeded with `seed`.
    pub fn generate(&self, seed: u64) -> Result<Graph, GraphError> {
        let mut rng = StdRng::seed_from_u64(seed);
        match *self {
            Self::WattsStrogatz { n, k, p } => generate::watts_strogatz(n, k, p, &mut rng),
            Self::BarabasiAlbert { n, m } => generate::barabasi_albert(n, m, &mut rng),
            Self::ErdosRenyi { n, p } => generate::erdos_renyi(n, p, &mut rng),
            Self::RandomTree { k } => generate::random_tree(k, &mut rng),
            Self::Complete { n } => Ok(generate::complete(n)),
            Self::RandomBipartite { m, n, p } => generate::random_bipartite(m, n, p, &mut rng),
        }
    }
}

/// Every graph written by `treeiso generate`.
pub fn standard_dataset() -> Vec<GraphRecipe> {
    let mut recipes = vec![
        GraphRecipe::WattsStrogatz { n: 100, k: 10, p: 0.1 },
        GraphRecipe::BarabasiAlbert { n: 100, m: 1 },
        GraphRecipe::BarabasiAlbert { n: 100, m: 2 },
        GraphRecipe::ErdosRenyi { n: 100, p: 0.1 },
    ];
    recipes.extend(
        [20, 50, 100, 200, 500]
            .into_iter()
            .map(|n| GraphRecipe::ErdosRenyi { n, p: 2.0 / n as f64 }),
    );
    recipes.extend((3..15).map(|k| GraphRecipe::RandomTree { k }));
    recipes.extend(
        [25, 50, 100, 200]
            .into_iter()
            .map(|n| GraphRecipe::Complete { n }),
    );
    recipes.extend(
        [(10, 10), (20, 20), (50, 50)]
            .into_iter()
            .map(|(m, n)| GraphRecipe::RandomBipartite { m, n, p: 0.5 }),
    );
    recipes
}

/// Hosts timed by `treeiso bench` when no graph directory is given. Small
/// enough for brute force to finish.
pub fn bench_hosts() -> Vec<GraphRecipe> {
    vec![
        GraphRecipe::ErdosRenyi { n: 20, p: 0.1 },
        GraphRecipe::ErdosRenyi { n: 30, p: 2.0 / 30.0 },
        GraphRecipe::BarabasiAlbert { n: 30, m: 1 },
        GraphRecipe::BarabasiAlbert { n: 30, m: 2 },
        GraphRecipe::WattsStrogatz { n: 30, k: 4, p: 0.1 },
        GraphRecipe::Complete { n: 12 },
        GraphRecipe::RandomBipartite { m: 6, n: 6, p: 0.5 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_paths_follow_generator_layout() {
        let recipe = GraphRecipe::BarabasiAlbert { n: 100, m: 2 };
        assert_eq!(
            recipe.path_in(Path::new("data"), 123),
            PathBuf::from("data/barabasi_albert_graph/barabasi_albert_graph_100_2_123.edgelist")
        );
    }

    #[test]
    fn dataset_names_are_unique() {
        let mut names: Vec<_> = standard_dataset().iter().map(|s| s.name(1)).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn every_bench_host_generates() {
        for recipe in bench_hosts() {
            let graph = recipe.generate(5).unwrap();
            assert!(graph.num_nodes() > 0, "{}", recipe.name(5));
        }
    }
}
