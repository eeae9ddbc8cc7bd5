//! treeiso CLI
//!
//! Entry point for the treeiso command-line tool. Searches for a random query
//! tree inside a host graph, writes the standard graph dataset, or benchmarks
//! color coding against brute force.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;
mod bench;
mod dataset;

use std::error::Error;
use std::time::Instant;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::info;
use treeiso_common::edgelist::{read_edgelist, save_edgelist};
use treeiso_common::{Graph, generate};
use treeiso_subgraph::IsomorphismFinder;

use args::{Args, BenchArgs, Command, GenerateArgs, SearchArgs};

fn search(args: &SearchArgs) -> Result<(), Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let graph: Graph = match &args.graph_path {
        Some(path) => read_edgelist(path)?,
        None => generate::erdos_renyi(100, 0.1, &mut rng)?,
    };
    let tree = generate::random_tree(args.num_tree_nodes, &mut rng)?;
    let config = args.to_config();

    info!(
        "graph: {} ({} nodes, {} edges)",
        args.graph_path
            .as_ref()
            .map_or_else(|| "G(100, 0.1)".to_string(), |p| p.display().to_string()),
        graph.num_nodes(),
        graph.num_edges()
    );
    info!("tree: {} nodes", tree.num_nodes());
    info!("config: {:?}", config);

    let start = Instant::now();
    let report = IsomorphismFinder::new(config).search(&graph, &tree)?;
    let elapsed = start.elapsed().as_secs_f64();

    println!(
        "Isomorphic tree {}found (elapsed time: {elapsed}s)",
        if report.found { "" } else { "not " }
    );
    if let Some(embedding) = &report.embedding {
        for (query, host) in embedding.labelled(&graph, &tree) {
            println!("  {query} -> {host}");
        }
    }
    Ok(())
}

fn generate_dataset(args: &GenerateArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    let recipes = dataset::standard_dataset();
    info!(
        "writing {} graphs under {}",
        recipes.len(),
        args.out.display()
    );
    recipes.par_iter().try_for_each(|recipe| {
        let path = recipe.path_in(&args.out, args.seed);
        let graph = recipe.generate(args.seed)?;
        save_edgelist(&path, &graph)?;
        info!(
            "{}: {} nodes, {} edges",
            path.display(),
            graph.num_nodes(),
            graph.num_edges()
        );
        Ok(())
    })
}

fn run_bench(args: &BenchArgs) -> Result<(), Box<dyn Error>> {
    let rows = bench::run_bench(args)?;
    bench::write_rows(&args.out, &rows)?;
    info!("wrote {} rows to {}", rows.len(), args.out.display());
    Ok(())
}

/// Executes the treeiso CLI.
///
/// This function:
/// 1. Initializes logging
/// 2. Parses command-line arguments
/// 3. Runs the chosen subcommand
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    match &args.command {
        Command::Search(search_args) => search(search_args),
        Command::Generate(generate_args) => {
            generate_dataset(generate_args).map_err(|e| -> Box<dyn Error> { e })
        }
        Command::Bench(bench_args) => run_bench(bench_args),
    }
}
