//! Wall-clock comparison of both algorithms.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};
use treeiso_common::edgelist::read_edgelist;
use treeiso_common::{Algorithm, Config, Graph, generate};
use treeiso_subgraph::{IsomorphismFinder, SearchError};

use crate::args::BenchArgs;
use crate::dataset::bench_hosts;

/// One CSV line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchRow {
    pub n: usize,
    pub k: usize,
    pub graph: String,
    pub bf_flag: bool,
    pub cc_flag: bool,
    pub time_bf: f64,
    pub time_cc: f64,
}

fn load_hosts(args: &BenchArgs) -> Result<Vec<(String, Graph)>, Box<dyn Error>> {
    let Some(dir) = &args.graph_dir else {
        return bench_hosts()
            .into_iter()
            .map(|recipe| -> Result<_, Box<dyn Error>> {
                Ok((recipe.name(args.seed), recipe.generate(args.seed)?))
            })
            .collect();
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "edgelist") {
            paths.push(path);
        }
    }
    paths.sort();
    paths
        .into_iter()
        .map(|path| -> Result<_, Box<dyn Error>> {
            let graph = read_edgelist(&path)?;
            Ok((path.display().to_string(), graph))
        })
        .collect()
}

fn timed(finder: &IsomorphismFinder, host: &Graph, query: &Graph) -> Result<(bool, f64), SearchError> {
    let start = Instant::now();
    let found = finder.find(host, query)?;
    Ok((found, start.elapsed().as_secs_f64()))
}

/// Runs both algorithms for every host and every `k` in
/// `min_k..=max_k`, one random query tree per `k`.
pub fn run_bench(args: &BenchArgs) -> Result<Vec<BenchRow>, Box<dyn Error>> {
    let hosts = load_hosts(args)?;
    info!(
        "benchmarking {} hosts for k in {}..={}",
        hosts.len(),
        args.min_k,
        args.max_k
    );

    let finder_for = |algorithm: Algorithm| {
        IsomorphismFinder::new(
            Config::builder()
                .algorithm(algorithm)
                .seed(args.seed)
                .parallel(args.parallel)
                .build(),
        )
    };
    let color_coding = finder_for(Algorithm::ColorCoding);
    let brute_force = finder_for(Algorithm::BruteForce);

    let mut rows = Vec::new();
    for k in args.min_k.max(1)..=args.max_k {
        let mut rng = StdRng::seed_from_u64(args.seed.wrapping_add(k as u64));
        let query = generate::random_tree(k, &mut rng)?;
        for (name, host) in &hosts {
            let (cc_flag, time_cc) = timed(&color_coding, host, &query)?;
            let (bf_flag, time_bf) = timed(&brute_force, host, &query)?;
            debug!(
                "{} k={}: bf={} ({:.4}s) cc={} ({:.4}s)",
                name, k, bf_flag, time_bf, cc_flag, time_cc
            );
            rows.push(BenchRow {
                n: host.num_nodes(),
                k,
                graph: name.clone(),
                bf_flag,
                cc_flag,
                time_bf,
                time_cc,
            });
        }
    }
    Ok(rows)
}

/// Writes `rows` with a header line, creating parent directories.
pub fn write_rows(path: &Path, rows: &[BenchRow]) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
