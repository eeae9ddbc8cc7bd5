#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use quickcheck::{Arbitrary, Gen, TestResult, quickcheck};
use rand::SeedableRng;
use rand::rngs::StdRng;
use treeiso_common::{GraphNodeIdx, default_trials, generate};
use treeiso_subgraph::decomposition::SubtreeView;
use treeiso_subgraph::{BruteForce, ColorCoding, DecompositionTree, find_by_brute_force};

mod common;

use common::{random_instance, setup_test_logging};

/// Parameters of a small random search instance.
#[derive(Clone, Debug)]
struct Instance {
    seed: u64,
    n: usize,
    k: usize,
    p: f64,
}

impl Arbitrary for Instance {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = usize::arbitrary(g) % 8 + 1;
        Self {
            seed: u64::arbitrary(g),
            n,
            // occasionally larger than the host
            k: usize::arbitrary(g) % (n.min(5) + 1) + 1,
            p: f64::from(u8::arbitrary(g) % 9 + 1) / 10.0,
        }
    }
}

/// Splits `view` down to leaves, checking the partition law at every step,
/// and appends the query node of every leaf to `leaves`.
fn split_to_leaves(tree: &DecompositionTree, view: SubtreeView, leaves: &mut Vec<GraphNodeIdx>) -> bool {
    let Ok(split) = tree.split(view) else {
        leaves.push(tree.root_label(view));
        return tree.size(view) == 1;
    };
    let whole = tree.node_set(view);
    let stay = tree.node_set(split.stay);
    let off = tree.node_set(split.split_off);
    let members_covered = tree
        .members(split.stay)
        .iter()
        .chain(tree.members(split.split_off))
        .all(|&n| tree.contains(view, n));
    members_covered
        && tree.members(view).len() == whole.len()
        && stay.is_disjoint(off)
        && stay.len() + off.len() == whole.len()
        && stay.partitions(off, whole)
        && tree.root_label(split.stay) == tree.root_label(view)
        && tree.parent_label(split.split_off) == Some(tree.root_label(view))
        && split_to_leaves(tree, split.stay, leaves)
        && split_to_leaves(tree, split.split_off, leaves)
}

quickcheck! {
    fn prop_split_partitions_down_to_leaves(seed: u64, k: u8) -> bool {
        let k = usize::from(k % 40) + 1;
        let mut rng = StdRng::seed_from_u64(seed);
        let query = generate::random_tree(k, &mut rng).unwrap();
        let tree = DecompositionTree::build_randomized(&query, &mut rng).unwrap();

        let mut leaves = Vec::new();
        if !split_to_leaves(&tree, tree.root_view(), &mut leaves) {
            return false;
        }
        leaves.sort_unstable();
        leaves == query.nodes().collect::<Vec<_>>()
    }

    fn prop_color_coding_has_no_false_positives(instance: Instance) -> TestResult {
        setup_test_logging();
        let (host, query) = random_instance(instance.seed, instance.n, instance.k, instance.p);
        let tree = DecompositionTree::build(&query).unwrap();
        let outcome = ColorCoding::new(&host, &tree)
            .unwrap()
            .search(default_trials(instance.k), instance.seed, false)
            .unwrap();

        let Some(hit) = outcome.hit else {
            return TestResult::discard();
        };
        TestResult::from_bool(
            hit.embedding.is_valid_for(&host, &query)
                && hit.colors.len() == instance.k
                && find_by_brute_force(&host, &query),
        )
    }

    fn prop_answer_ignores_node_labels(instance: Instance, relabel_seed: u64) -> bool {
        let (host, query) = random_instance(instance.seed, instance.n, instance.k, instance.p);
        let mut rng = StdRng::seed_from_u64(relabel_seed);
        let shuffled_host = generate::relabel_shuffled(&host, &mut rng);
        let shuffled_query = generate::relabel_shuffled(&query, &mut rng);

        let expected = find_by_brute_force(&host, &query);
        let outcome = BruteForce::new(&shuffled_host, &shuffled_query).search(false);
        outcome.embedding.is_some() == expected
            && outcome
                .embedding
                .is_none_or(|embedding| embedding.is_valid_for(&shuffled_host, &shuffled_query))
    }

    fn prop_brute_force_witness_is_valid(instance: Instance) -> bool {
        let (host, query) = random_instance(instance.seed, instance.n, instance.k, instance.p);
        let outcome = BruteForce::new(&host, &query).search(false);
        outcome
            .embedding
            .is_none_or(|embedding| embedding.is_valid_for(&host, &query))
    }
}

#[test]
fn test_ground_truth_agreement_rate() {
    setup_test_logging();
    let mut positives = 0usize;
    let mut recovered = 0usize;

    for seed in 0..120u64 {
        let n = 5 + (seed % 4) as usize;
        let k = 2 + (seed % 4) as usize;
        let (host, query) = random_instance(seed, n, k, 0.35);
        let tree = DecompositionTree::build(&query).unwrap();
        let found = ColorCoding::new(&host, &tree)
            .unwrap()
            .search(default_trials(k), seed.wrapping_mul(31), false)
            .unwrap()
            .found();
        let truth = find_by_brute_force(&host, &query);

        // one-sided: color coding never claims what brute force denies
        assert!(!found || truth, "false positive on seed {seed}");
        if truth {
            positives += 1;
            recovered += usize::from(found);
        }
    }

    assert!(positives > 0);
    let rate = recovered as f64 / positives as f64;
    assert!(
        rate >= 1.0 - std::f64::consts::E.recip(),
        "recovered {recovered}/{positives}"
    );
}
