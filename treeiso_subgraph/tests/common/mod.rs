#![allow(dead_code)]

use std::sync::Once;

use rand::SeedableRng;
use rand::rngs::StdRng;
use treeiso_common::{Graph, generate};

static INIT: Once = Once::new();

/// Configures logging for the test runner.
pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Host path `1 - 2 - 3 - 4 - 5`.
pub fn five_path() -> Graph {
    Graph::from_edges([(1, 2), (2, 3), (3, 4), (4, 5)])
}

/// Two disjoint triangles on six nodes.
pub fn two_triangles() -> Graph {
    Graph::from_edges([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)])
}

/// A small random `(host, query)` pair drawn from `seed`: an Erdős–Rényi host
/// on `n` nodes and a uniform random tree on `k` nodes.
pub fn random_instance(seed: u64, n: usize, k: usize, p: f64) -> (Graph, Graph) {
    let mut rng = StdRng::seed_from_u64(seed);
    let host = generate::erdos_renyi(n, p, &mut rng).expect("valid probability");
    let query = generate::random_tree(k, &mut rng).expect("k >= 1");
    (host, query)
}
