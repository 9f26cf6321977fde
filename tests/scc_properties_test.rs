extern crate tarjan_scc;

#[cfg(test)]
mod test {
    use std::collections::VecDeque;

    use itertools::Itertools;
    use rand::{Rng, RngCore, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;
    use rustc_hash::{FxHashMap, FxHashSet};
    use tarjan_scc::scc::{
        find_components, find_components_par, find_components_with_sink, replay_components, trace, FnSink,
        Graph, Snapshot,
    };

    fn random_graph(rng: &mut dyn RngCore, n_vertices: usize, edge_probability: f64) -> Graph<usize> {
        let mut graph = Graph::new();
        for u in 0..n_vertices {
            // undeclared vertices only exist as edge targets
            if !rng.gen_bool(0.8) {
                continue;
            }
            graph.add_vertex(u);
            for v in 0..n_vertices {
                if rng.gen_bool(edge_probability) {
                    graph.add_edge(u, v);
                }
            }
        }
        graph
    }

    fn reachable_from(graph: &Graph<usize>, start: usize) -> FxHashSet<usize> {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(v) = queue.pop_front() {
            for &w in graph.successors(&v) {
                if seen.insert(w) {
                    queue.push_back(w);
                }
            }
        }
        seen
    }

    fn membership(components: &[Vec<usize>]) -> FxHashMap<usize, usize> {
        components
            .iter()
            .enumerate()
            .flat_map(|(i, component)| component.iter().map(move |&v| (v, i)))
            .collect()
    }

    fn random_graphs() -> Vec<Graph<usize>> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        (0..200)
            .map(|_| {
                let n_vertices = rng.gen_range(0..30);
                let edge_probability = rng.gen_range(0.0..0.2);
                random_graph(&mut rng, n_vertices, edge_probability)
            })
            .collect()
    }

    #[test]
    fn every_vertex_in_exactly_one_component() {
        for graph in random_graphs() {
            let components = find_components(&graph);
            let emitted = components.iter().flatten().copied().sorted().collect_vec();
            let expected = graph.all_vertices().into_iter().copied().sorted().collect_vec();
            assert_eq!(emitted, expected);
            assert!(components.iter().all(|component| !component.is_empty()));
        }
    }

    #[test]
    fn components_are_mutual_reachability_classes() {
        for graph in random_graphs() {
            let components = find_components(&graph);
            let component_of = membership(&components);
            let vertices = graph.all_vertices().into_iter().copied().collect_vec();
            let reach: FxHashMap<usize, FxHashSet<usize>> =
                vertices.iter().map(|&v| (v, reachable_from(&graph, v))).collect();
            for &u in &vertices {
                for &v in &vertices {
                    let mutual = reach[&u].contains(&v) && reach[&v].contains(&u);
                    assert_eq!(component_of[&u] == component_of[&v], mutual, "{u} and {v}");
                }
            }
        }
    }

    #[test]
    fn components_close_after_everything_they_reach() {
        for graph in random_graphs() {
            let components = find_components(&graph);
            let component_of = membership(&components);
            for (u, successors) in graph.iter() {
                for v in successors {
                    assert!(component_of[v] <= component_of[u], "edge {u} -> {v}");
                }
            }
        }
    }

    #[test]
    fn repeated_runs_agree() {
        for graph in random_graphs() {
            assert_eq!(find_components(&graph), find_components(&graph));
        }
    }

    #[test]
    fn trace_is_observational() {
        for graph in random_graphs() {
            let silent = find_components(&graph);

            let mut snapshots = Vec::new();
            assert_eq!(find_components_with_sink(&graph, &mut snapshots), silent);
            assert_eq!(replay_components(&snapshots), silent);

            let lazy: Vec<_> = trace(&graph).collect();
            assert_eq!(lazy, snapshots);

            let mut count = 0;
            let with_closure = find_components_with_sink(&graph, &mut FnSink(|_: Snapshot<usize>| count += 1));
            assert_eq!(with_closure, silent);
            assert_eq!(count, snapshots.len());
        }
    }

    #[test]
    fn snapshots_respect_run_invariants() {
        for graph in random_graphs() {
            for snapshot in trace(&graph) {
                assert!(snapshot.stack.iter().all_unique());
                for vertex in &snapshot.stack {
                    assert!(snapshot.index_of(vertex).is_some());
                }
                for (vertex, index) in &snapshot.indices {
                    match (index, snapshot.lowlink_of(vertex)) {
                        (Some(index), Some(lowlink)) => assert!(lowlink <= *index),
                        (None, None) => {}
                        other => panic!("index and lowlink disagree for {vertex}: {other:?}"),
                    }
                }
            }
        }
    }

    #[test]
    fn parallel_batch_matches() {
        let graphs = random_graphs();
        let sequential: Vec<_> = graphs.iter().map(find_components).collect();
        assert_eq!(find_components_par(&graphs), sequential);
    }

    #[test]
    fn edgeless_graph_gives_singletons() {
        let mut graph = Graph::new();
        for v in 0..50 {
            graph.add_vertex(v);
        }
        let components = find_components(&graph);
        assert_eq!(components, (0..50).map(|v| vec![v]).collect_vec());
    }

    #[test]
    fn single_cycle_gives_one_component() {
        let n = 17;
        let graph = Graph::from_edges((0..n).map(|v| (v, (v + 1) % n)));
        let components = find_components(&graph);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].iter().copied().sorted().collect_vec(), (0..n).collect_vec());
        assert_eq!(components[0].last(), Some(&0));
    }

    #[test]
    fn long_chain_does_not_exhaust_call_stack() {
        let n = 200_000;
        let graph = Graph::from_edges((0..n - 1).map(|v| (v, v + 1)));
        let components = find_components(&graph);
        assert_eq!(components.len(), n);
        assert_eq!(components[0], vec![n - 1]);
        assert_eq!(components[n - 1], vec![0]);
    }

    #[test]
    fn long_cycle_is_one_component() {
        let n = 200_000;
        let graph = Graph::from_edges((0..n).map(|v| (v, (v + 1) % n)));
        let components = find_components(&graph);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), n);
    }
}
