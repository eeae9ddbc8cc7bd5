use std::path::PathBuf;

use clap::{Parser, Subcommand};
use treeiso_common::{Algorithm, Config};

/// treeiso - find a tree inside a graph by color coding or brute force
#[derive(Parser, Debug)]
#[command(name = "treeiso")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for a random query tree in one host graph
    Search(SearchArgs),
    /// Write the standard benchmark dataset as edge lists
    Generate(GenerateArgs),
    /// Time both algorithms over generated graphs and write a CSV report
    Bench(BenchArgs),
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Edge-list file of the host graph; a G(100, 0.1) graph is generated if omitted
    #[arg(short = 'g', long)]
    pub graph_path: Option<PathBuf>,

    /// Number of nodes of the random query tree
    #[arg(short = 'k', long, default_value_t = 5)]
    pub num_tree_nodes: usize,

    /// Master seed for graph, tree and search randomness
    #[arg(short = 's', long, default_value_t = 42)]
    pub seed: u64,

    /// Search algorithm
    #[arg(short = 'a', long, value_enum, default_value = "color-coding")]
    pub algorithm: AlgorithmArg,

    /// Override the color-coding trial budget
    #[arg(long)]
    pub max_trials: Option<usize>,

    /// Target false-negative probability for color coding
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Run trials on the current thread instead of the rayon pool
    #[arg(long)]
    pub sequential: bool,
}

impl SearchArgs {
    /// Convert command-line arguments into internal configuration
    pub fn to_config(&self) -> Config {
        let mut builder = Config::builder()
            .algorithm(self.algorithm.into())
            .seed(self.seed)
            .maybe_max_trials(self.max_trials)
            .parallel(!self.sequential);
        if let Some(eps) = self.epsilon {
            builder = builder.epsilon(eps);
        }
        builder.build()
    }
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Output directory; one sub-directory per generator
    #[arg(short = 'o', long, default_value = "data")]
    pub out: PathBuf,

    /// Seed shared by every generator
    #[arg(short = 's', long, default_value_t = 123)]
    pub seed: u64,
}

#[derive(clap::Args, Debug)]
pub struct BenchArgs {
    /// CSV file to write
    #[arg(short = 'o', long, default_value = "results/bench.csv")]
    pub out: PathBuf,

    /// Benchmark every `*.edgelist` in this directory instead of the built-in graphs
    #[arg(long)]
    pub graph_dir: Option<PathBuf>,

    /// Master seed
    #[arg(short = 's', long, default_value_t = 42)]
    pub seed: u64,

    /// Smallest query tree size
    #[arg(long, default_value_t = 3)]
    pub min_k: usize,

    /// Largest query tree size
    #[arg(long, default_value_t = 6)]
    pub max_k: usize,

    /// Enable parallel execution inside each search
    #[arg(short = 'p', long, default_value_t = false)]
    pub parallel: bool,
}

/// Command-line argument wrapper for Algorithm
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum AlgorithmArg {
    /// Randomized color coding
    #[value(name = "color-coding", alias = "color_coding")]
    ColorCoding,
    /// Exhaustive enumeration
    #[value(name = "brute-force", alias = "brute_force")]
    BruteForce,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::ColorCoding => Self::ColorCoding,
            AlgorithmArg::BruteForce => Self::BruteForce,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_args_to_config() {
        let args = Args::parse_from([
            "treeiso",
            "search",
            "-k",
            "4",
            "--algorithm",
            "brute_force",
            "--max-trials",
            "10",
            "--seed",
            "7",
        ]);
        let Command::Search(search) = args.command else {
            panic!("expected search");
        };
        let config = search.to_config();
        assert_eq!(config.algorithm, Algorithm::BruteForce);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_trials, Some(10));
        assert_eq!(search.num_tree_nodes, 4);
        assert!(config.parallel);
    }

    #[test]
    fn sequential_flag_disables_parallel_search() {
        let args = Args::parse_from(["treeiso", "search", "--sequential"]);
        let Command::Search(search) = args.command else {
            panic!("expected search");
        };
        assert!(!search.to_config().parallel);
    }

    #[test]
    fn bench_defaults() {
        let args = Args::parse_from(["treeiso", "bench"]);
        let Command::Bench(bench) = args.command else {
            panic!("expected bench");
        };
        assert_eq!((bench.min_k, bench.max_k), (3, 6));
        assert!(bench.graph_dir.is_none());
    }

    #[test]
    fn unknown_algorithm_is_a_usage_error() {
        assert!(Args::try_parse_from(["treeiso", "search", "-a", "vf2"]).is_err());
    }
}
