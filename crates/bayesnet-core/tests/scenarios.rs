use bayesnet_core::domain::Domain;
use bayesnet_core::junction::JunctionTree;
use bayesnet_core::network::Network;
use bayesnet_core::table::Table;
use bayesnet_core::variable::Variable;

fn table(vars: &[&Variable], values: Vec<f64>) -> Table {
    let domain = Domain::new(vars.iter().map(|v| (*v).clone())).unwrap();
    Table::new(domain, values).unwrap()
}

fn assert_close(values: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(values.len(), expected.len());
    for (v, e) in values.iter().zip(expected) {
        assert!(
            (v - e).abs() < tol,
            "expected {:?}, got {:?} (tol {})",
            expected,
            values,
            tol
        );
    }
}

/// S1: the six-variable "Pyramid" network, with evidence asserted on `F`.
/// Every variable's junction-tree marginal must match the naive network's
/// brute-force marginal to 8 decimals.
#[test]
fn s1_pyramid_tree_marginals_match_naive_network() {
    let a = Variable::binary("A");
    let b = Variable::binary("B");
    let c = Variable::binary("C");
    let d = Variable::binary("D");
    let e = Variable::binary("E");
    let f = Variable::binary("F");

    let mut net = Network::new();
    net.add_table(table(&[&a], vec![0.55, 0.45]));
    net.add_table(table(&[&a, &b], vec![0.1, 0.9, 0.9, 0.1]));
    net.add_table(table(&[&a, &c], vec![0.25, 0.75, 0.35, 0.65]));
    net.add_table(table(&[&b, &d], vec![0.40, 0.60, 0.65, 0.35]));
    net.add_table(table(&[&c, &f], vec![0.99, 0.01, 0.03, 0.97]));
    net.add_table(table(
        &[&b, &c, &e],
        vec![0.54, 0.46, 0.37, 0.63, 0.11, 0.89, 0.27, 0.73],
    ));
    // Evidence: F observed, weighted toward state 0.
    net.add_table(table(&[&f], vec![100.0, 15.0]));

    let tree = JunctionTree::compile(&net).unwrap();
    let tree_marginals = tree.marginals().unwrap();
    let naive_marginals = net.marginals().unwrap();

    for var in [&a, &b, &c, &d, &e, &f] {
        let from_tree = tree_marginals
            .iter()
            .find(|t| t.domain().contains(var))
            .unwrap();
        let from_naive = naive_marginals
            .iter()
            .find(|t| t.domain().contains(var))
            .unwrap();
        assert!(
            from_tree.approx_eq(from_naive, 1e-8),
            "variable {} disagreed: tree={:?} naive={:?}",
            var,
            from_tree.values(),
            from_naive.values()
        );
    }
}

/// S2: the car-start problem (Jensen & Nielsen). Checks the posterior over
/// `Fu` and `Sp` after observing `St = 0`, then after additionally observing
/// `Fm = 1` (a noisy meter reading), against the book's published values.
#[test]
fn s2_car_start_posteriors_match_book_values() {
    let fu = Variable::binary("Fu");
    let sp = Variable::binary("Sp");
    let st = Variable::binary("St");
    let fm = Variable::new("Fm", 3);

    let mut net = Network::new();
    net.add_table(table(&[&fu], vec![0.02, 0.98]));
    net.add_table(table(&[&sp], vec![0.04, 0.96]));
    net.add_table(table(
        &[&fu, &fm],
        vec![0.998, 0.001, 0.001, 0.01, 0.60, 0.39],
    ));
    net.add_table(table(
        &[&st, &fu, &sp],
        vec![1.0, 1.0, 0.99, 0.01, 0.0, 0.0, 0.01, 0.99],
    ));
    // Evidence: St = 0.
    net.add_table(table(&[&st], vec![1.0, 0.0]));

    let tree = JunctionTree::compile(&net).unwrap();
    let p_fu = tree.marginal(&fu).unwrap();
    let p_sp = tree.marginal(&sp).unwrap();
    assert_close(p_fu.values(), &[0.29, 0.71], 0.01);
    assert_close(p_sp.values(), &[0.58, 0.42], 0.01);

    // Additional evidence: a noisy meter reading of Fm = 1.
    net.add_table(table(&[&fm], vec![0.0, 1.0, 0.0]));
    let tree = JunctionTree::compile(&net).unwrap();
    let p_fu = tree.marginal(&fu).unwrap();
    let p_sp = tree.marginal(&sp).unwrap();
    assert_close(p_sp.values(), &[0.804, 0.196], 0.01);
    assert_close(p_fu.values(), &[0.001, 0.999], 0.01);
}

/// S3: two variables with no table connecting them compile to two
/// singleton-clique subgraphs, and the shared normalization is 1 when both
/// tables are already probability distributions.
#[test]
fn s3_disconnected_pair_has_two_roots_and_trivial_normalization() {
    let a = Variable::binary("A");
    let b = Variable::binary("B");
    let mut net = Network::new();
    net.add_table(table(&[&a], vec![0.1, 0.9]));
    net.add_table(table(&[&b], vec![0.2, 0.8]));

    let tree = JunctionTree::compile(&net).unwrap();
    assert_eq!(tree.cliques().len(), 2);
    assert!((tree.normalization() - 1.0).abs() < 1e-9);

    let ma = tree.marginal(&a).unwrap();
    let mb = tree.marginal(&b).unwrap();
    assert_close(ma.values(), &[0.1, 0.9], 1e-9);
    assert_close(mb.values(), &[0.2, 0.8], 1e-9);
}

/// S4: a fully-connected triangle plus an isolated fourth variable, one
/// 3-variable clique and one singleton clique, still agreeing with the
/// naive engine on every marginal.
#[test]
fn s4_triangle_plus_isolate_compiles_and_matches_naive() {
    let a = Variable::binary("A");
    let b = Variable::binary("B");
    let c = Variable::binary("C");
    let d = Variable::binary("D");

    let mut net = Network::new();
    net.add_table(table(&[&a, &b], vec![0.6, 0.4, 0.3, 0.7]));
    net.add_table(table(&[&b, &c], vec![0.5, 0.5, 0.2, 0.8]));
    net.add_table(table(&[&a, &c], vec![0.9, 0.1, 0.4, 0.6]));
    net.add_table(table(&[&d], vec![0.25, 0.75]));

    let tree = JunctionTree::compile(&net).unwrap();
    assert_eq!(tree.cliques().len(), 2);

    let tree_marginals = tree.marginals().unwrap();
    let naive_marginals = net.marginals().unwrap();
    for var in [&a, &b, &c, &d] {
        let from_tree = tree_marginals
            .iter()
            .find(|t| t.domain().contains(var))
            .unwrap();
        let from_naive = naive_marginals
            .iter()
            .find(|t| t.domain().contains(var))
            .unwrap();
        assert!(from_tree.approx_eq(from_naive, 1e-8));
    }
}

const CHAIN_LEN: usize = 10;

// Fixed pseudo-random-looking but deterministic edge weights, distinct per
// edge so the chain isn't degenerate/symmetric.
const CHAIN_EDGE_VALUES: [[f64; 4]; CHAIN_LEN - 1] = [
    [0.7, 0.3, 0.2, 0.8],
    [0.6, 0.4, 0.55, 0.45],
    [0.15, 0.85, 0.95, 0.05],
    [0.4, 0.6, 0.1, 0.9],
    [0.8, 0.2, 0.3, 0.7],
    [0.25, 0.75, 0.65, 0.35],
    [0.5, 0.5, 0.05, 0.95],
    [0.9, 0.1, 0.4, 0.6],
    [0.35, 0.65, 0.7, 0.3],
];

fn chain_network() -> (Network, Vec<Variable>) {
    let vars: Vec<Variable> = (0..CHAIN_LEN)
        .map(|i| Variable::binary(format!("A{i}")))
        .collect();

    let mut net = Network::new();
    net.add_table(table(&[&vars[0]], vec![0.35, 0.65]));
    for i in 0..CHAIN_LEN - 1 {
        net.add_table(table(
            &[&vars[i], &vars[i + 1]],
            CHAIN_EDGE_VALUES[i].to_vec(),
        ));
    }
    (net, vars)
}

/// S6: a ten-variable linear chain with fixed (but non-uniform) pairwise
/// tables. The junction tree must agree with brute-force marginalization on
/// every variable within 1e-8.
#[test]
fn s6_ten_variable_chain_matches_naive_within_tolerance() {
    let (net, vars) = chain_network();

    let tree = JunctionTree::compile(&net).unwrap();
    let tree_marginals = tree.marginals().unwrap();
    let naive_marginals = net.marginals().unwrap();

    for var in &vars {
        let from_tree = tree_marginals
            .iter()
            .find(|t| t.domain().contains(var))
            .unwrap();
        let from_naive = naive_marginals
            .iter()
            .find(|t| t.domain().contains(var))
            .unwrap();
        assert!(
            from_tree.approx_eq(from_naive, 1e-8),
            "variable {} disagreed: tree={:?} naive={:?}",
            var,
            from_tree.values(),
            from_naive.values()
        );
    }
}

/// S6: the junction tree must compute strictly faster than the naive path
/// of calling `Network::marginal` once per variable. A compiled tree reads
/// each marginal off its host clique in work independent of the chain's
/// length (the elimination and message passing happened once, in
/// `JunctionTree::compile`), whereas `Network::marginal` re-marginalizes
/// the whole remaining domain from scratch for every call, which is
/// quadratic in the chain length across all variables. Ten variables is
/// already enough for that asymptotic gap to dominate timing noise.
#[test]
fn s6_tree_path_is_faster_than_per_variable_naive_marginalization() {
    use std::time::Instant;

    let (net, vars) = chain_network();

    // One warm-up pass of each path, discarded, so neither measurement pays
    // a one-off first-call cost the other doesn't.
    let warmup_tree = JunctionTree::compile(&net).unwrap();
    for v in &vars {
        warmup_tree.marginal(v).unwrap();
    }
    for v in &vars {
        net.marginal(v).unwrap();
    }

    let naive_start = Instant::now();
    for v in &vars {
        net.marginal(v).unwrap();
    }
    let naive_elapsed = naive_start.elapsed();

    let tree_start = Instant::now();
    let tree = JunctionTree::compile(&net).unwrap();
    for v in &vars {
        tree.marginal(v).unwrap();
    }
    let tree_elapsed = tree_start.elapsed();

    assert!(
        tree_elapsed < naive_elapsed,
        "expected compile-once-then-extract to beat per-variable naive marginalization: \
         tree={:?} naive={:?}",
        tree_elapsed,
        naive_elapsed
    );
}
