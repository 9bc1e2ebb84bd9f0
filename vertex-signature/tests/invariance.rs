//! Rankings must depend on graph structure only, never on labels.

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use vertex_signature::{letter_label, AdjacencyGraph, ConvergenceError, Engine, Ranking};

fn random_graph(rng: &mut StdRng, n: usize, edges: usize) -> AdjacencyGraph {
    let mut graph = AdjacencyGraph::new();
    for i in 0..n {
        graph.add_vertex(letter_label(i));
    }
    for _ in 0..edges {
        let (a, b) = (letter_label(rng.gen_range(0..n)), letter_label(rng.gen_range(0..n)));
        if a != b && !graph.has_edge(&a, &b) {
            graph.add_edge(a, b).unwrap();
        }
    }
    graph
}

/// Relabel every vertex with a shuffled, unrelated name.
fn shuffled_mapping(rng: &mut StdRng, graph: &AdjacencyGraph) -> BTreeMap<String, String> {
    let n = graph.vertex_count();
    let mut new: Vec<String> = (0..n).map(|i| format!("v{i:03}")).collect();
    new.shuffle(rng);
    (0..n).map(letter_label).zip(new).collect()
}

fn run(graph: &AdjacencyGraph) -> (Result<Ranking, ConvergenceError>, usize) {
    let mut engine = Engine::new(graph).unwrap();
    let outcome = engine.compute();
    (outcome, engine.passes())
}

fn assert_equivalent(
    original: &Result<Ranking, ConvergenceError>,
    relabeled: &Result<Ranking, ConvergenceError>,
    mapping: &BTreeMap<String, String>,
) {
    let (ranking, relabeled_ranking) = match (original, relabeled) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(a), Err(b)) => {
            assert_eq!(a.kind, b.kind);
            let mapped: BTreeSet<String> =
                a.unresolved.iter().map(|label| mapping[label].clone()).collect();
            assert_eq!(mapped, b.unresolved);
            (&a.partial, &b.partial)
        }
        _ => panic!("outcome kind changed under relabeling"),
    };

    assert_eq!(ranking.len(), relabeled_ranking.len());
    for (label, entry) in ranking.iter() {
        assert_eq!(relabeled_ranking.get(&mapping[label]), Some(entry), "vertex {label}");
    }
}

#[test]
fn test_random_relabelings_preserve_ranking() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..40 {
        let n = rng.gen_range(4..12);
        let edges = rng.gen_range(n..n * 2);
        let graph = random_graph(&mut rng, n, edges);
        let mapping = shuffled_mapping(&mut rng, &graph);
        let relabeled = graph.relabel(&mapping).unwrap();

        let (original, passes) = run(&graph);
        let (shuffled, shuffled_passes) = run(&relabeled);

        assert_eq!(passes, shuffled_passes, "round {round}");
        assert_equivalent(&original, &shuffled, &mapping);
    }
}

/// Edge set of `graph` with every vertex replaced by its rank.
fn canonical_edges(graph: &AdjacencyGraph, ranking: &Ranking) -> BTreeSet<(usize, usize)> {
    graph
        .edges()
        .into_iter()
        .map(|(a, b)| {
            let (a, b) = (ranking.rank(&a).unwrap(), ranking.rank(&b).unwrap());
            (a.min(b), a.max(b))
        })
        .collect()
}

#[test]
fn test_full_ranking_is_a_canonical_labelling() {
    let graph = AdjacencyGraph::from_edges([
        ("A", "B"),
        ("B", "C"),
        ("C", "D"),
        ("D", "E"),
        ("C", "F"),
        ("D", "F"),
    ])
    .unwrap();
    let mut rng = StdRng::seed_from_u64(17);

    let ranking = Engine::new(&graph).unwrap().compute().unwrap();
    let expected = canonical_edges(&graph, &ranking);

    for _ in 0..10 {
        let mapping = shuffled_mapping(&mut rng, &graph);
        let relabeled = graph.relabel(&mapping).unwrap();
        let relabeled_ranking = Engine::new(&relabeled).unwrap().compute().unwrap();

        assert_eq!(canonical_edges(&relabeled, &relabeled_ranking), expected);
    }
}

#[test]
fn test_compute_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(99);
    let graph = random_graph(&mut rng, 10, 16);

    let (first, first_passes) = run(&graph);
    let (second, second_passes) = run(&graph);

    assert_eq!(first_passes, second_passes);
    match (first, second) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(a), Err(b)) => {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.partial, b.partial);
            assert_eq!(a.unresolved, b.unresolved);
        }
        _ => panic!("outcome changed between runs"),
    }
}
