/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::no_logging;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use sccdist::graph::{DirectedGraph, RandomAccessGraph};
use sccdist::sccs::{assign_leaders, finish_order, kosaraju, Leaders};
use std::collections::{BTreeMap, VecDeque};

fn sccs(graph: &DirectedGraph) -> Leaders {
    kosaraju(graph, graph.transpose(), no_logging![])
}

/// For each node, the set of nodes it reaches, by brute force.
fn reachability(graph: &DirectedGraph) -> Vec<Vec<bool>> {
    let n = graph.num_nodes();
    let mut reach = vec![vec![false; n]; n];
    for (start, reached) in reach.iter_mut().enumerate() {
        let mut queue = VecDeque::from([start]);
        reached[start] = true;
        while let Some(node) = queue.pop_front() {
            for &succ in graph.successors(node) {
                if !reached[succ] {
                    reached[succ] = true;
                    queue.push_back(succ);
                }
            }
        }
    }
    reach
}

fn random_graph(rng: &mut SmallRng, n: usize, m: usize) -> Result<DirectedGraph> {
    let arcs = (0..m)
        .map(|_| (rng.random_range(1..=n), rng.random_range(1..=n)))
        .collect::<Vec<_>>();
    Ok(DirectedGraph::from_arcs(n, arcs)?)
}

#[test]
fn test_finish_order() -> Result<()> {
    let graph = DirectedGraph::from_arcs(3, [(3, 1)])?;
    assert_eq!(
        finish_order(&graph, no_logging![]),
        vec![1, 2, 0].into_boxed_slice()
    );

    // 3 is finished last, after its whole subtree
    let graph = DirectedGraph::from_arcs(4, [(4, 1), (1, 2), (1, 3)])?;
    assert_eq!(
        finish_order(&graph, no_logging![]),
        vec![3, 0, 2, 1].into_boxed_slice()
    );

    let graph = DirectedGraph::from_arcs(4, [(1, 2), (2, 1), (3, 4), (4, 3), (2, 3)])?;
    assert_eq!(
        finish_order(&graph, no_logging![]),
        vec![1, 0, 3, 2].into_boxed_slice()
    );

    Ok(())
}

#[test]
fn test_finish_order_topological() -> Result<()> {
    let graph = DirectedGraph::from_arcs(5, [(1, 2), (1, 3), (3, 4), (2, 4), (4, 5)])?;
    let order = finish_order(&graph, no_logging![]);
    let mut pos = vec![0; graph.num_nodes()];
    for (i, &node) in order.iter().enumerate() {
        pos[node] = i;
    }
    for u in 0..graph.num_nodes() {
        for &v in graph.successors(u) {
            assert!(pos[u] < pos[v]);
        }
    }
    Ok(())
}

#[test]
fn test_finish_order_is_permutation() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);
    for n in [1, 2, 10, 100] {
        let graph = random_graph(&mut rng, n, 2 * n)?;
        let mut order = finish_order(&graph, no_logging![]).into_vec();
        order.sort_unstable();
        assert_eq!(order, (0..graph.num_nodes()).collect::<Vec<_>>());
    }
    Ok(())
}

#[test]
fn test_two_components_joined_by_an_arc() -> Result<()> {
    let graph = DirectedGraph::from_arcs(4, [(1, 2), (2, 1), (3, 4), (4, 3), (2, 3)])?;
    let leaders = sccs(&graph);

    assert_eq!(leaders.num_components(), 2);
    assert_eq!(leaders.leaders(), &[1, 1, 3, 3]);
    assert_eq!(leaders.compute_sizes(), BTreeMap::from([(1, 2), (3, 2)]));

    Ok(())
}

#[test]
fn test_self_loop() -> Result<()> {
    let graph = DirectedGraph::from_arcs(1, [(1, 1)])?;
    let leaders = sccs(&graph);

    assert_eq!(leaders.num_components(), 1);
    assert_eq!(leaders.leaders(), &[0]);
    assert_eq!(leaders.compute_sizes(), BTreeMap::from([(0, 1)]));

    Ok(())
}

#[test]
fn test_no_arcs() -> Result<()> {
    let graph = DirectedGraph::new(6);
    let leaders = sccs(&graph);

    assert_eq!(leaders.num_components(), 6);
    for node in 0..6 {
        assert_eq!(leaders.leader(node), node);
    }

    let leaders = sccs(&DirectedGraph::new(0));
    assert_eq!(leaders.num_components(), 0);
    assert!(leaders.compute_sizes().is_empty());

    Ok(())
}

#[test]
fn test_isolated_vertex() -> Result<()> {
    let graph = DirectedGraph::from_arcs(4, [(1, 2), (2, 1), (2, 4), (4, 2)])?;
    let leaders = sccs(&graph);

    assert_eq!(leaders.leader(2), 2);
    assert_eq!(leaders.num_components(), 2);
    assert!(leaders.same_component(0, 3));

    Ok(())
}

#[test]
fn test_cycle() -> Result<()> {
    for k in [1, 2, 3, 10] {
        let graph = DirectedGraph::from_arcs(k, (1..=k).map(|v| (v, v % k + 1)))?;
        let leaders = sccs(&graph);
        assert_eq!(leaders.num_components(), 1);
        assert_eq!(leaders.compute_sizes().into_values().collect::<Vec<_>>(), vec![k]);
    }
    Ok(())
}

#[test]
fn test_buckets() -> Result<()> {
    let arcs = [
        (0, 0),
        (1, 0),
        (1, 2),
        (2, 1),
        (2, 3),
        (2, 4),
        (2, 5),
        (3, 4),
        (4, 3),
        (5, 5),
        (5, 6),
        (5, 7),
        (5, 8),
        (6, 7),
        (8, 7),
    ];
    let graph = DirectedGraph::from_arcs(9, arcs.map(|(u, v)| (u + 1, v + 1)))?;
    let leaders = sccs(&graph);

    assert_eq!(leaders.num_components(), 7);
    assert!(leaders.same_component(1, 2));
    assert!(leaders.same_component(3, 4));
    let mut sizes = leaders.compute_sizes().into_values().collect::<Vec<_>>();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(sizes, vec![2, 2, 1, 1, 1, 1, 1]);

    Ok(())
}

#[test]
fn test_complete_graph() -> Result<()> {
    let mut graph = DirectedGraph::new(5);
    for u in 1..=5 {
        for v in 1..=5 {
            if u != v {
                graph.add_arc(u, v)?;
            }
        }
    }
    let leaders = sccs(&graph);
    assert_eq!(leaders.num_components(), 1);
    Ok(())
}

#[test]
fn test_against_reachability() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..200 {
        let n = rng.random_range(1..30);
        let m = rng.random_range(0..3 * n);
        let graph = random_graph(&mut rng, n, m)?;
        let leaders = sccs(&graph);
        let reach = reachability(&graph);

        for u in 0..n {
            // Leaders are members of their own component
            assert_eq!(leaders.leader(leaders.leader(u)), leaders.leader(u));
            for v in 0..n {
                assert_eq!(
                    leaders.same_component(u, v),
                    reach[u][v] && reach[v][u],
                    "Nodes {u} and {v} in graph {graph:?}"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_leader_is_first_in_finish_order() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(1);
    for _ in 0..50 {
        let n = rng.random_range(1..50);
        let graph = random_graph(&mut rng, n, 2 * n)?;
        let order = finish_order(&graph, no_logging![]);
        let leaders = assign_leaders(graph.transpose(), &order, no_logging![]);

        let mut pos = vec![0; n];
        for (i, &node) in order.iter().enumerate() {
            pos[node] = i;
        }
        for node in 0..n {
            assert!(pos[leaders.leader(node)] <= pos[node]);
        }
    }
    Ok(())
}

#[test]
fn test_opposite_orientations() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(2);
    for _ in 0..50 {
        let n = rng.random_range(1..40);
        let graph = random_graph(&mut rng, n, 2 * n)?;
        let forward = kosaraju(&graph, graph.transpose(), no_logging![]);
        let backward = kosaraju(graph.transpose(), &graph, no_logging![]);

        assert_eq!(forward.num_components(), backward.num_components());
        for u in 0..n {
            for v in 0..n {
                assert_eq!(forward.same_component(u, v), backward.same_component(u, v));
            }
        }
    }
    Ok(())
}

#[test]
fn test_deterministic() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(3);
    let graph = random_graph(&mut rng, 1000, 1500)?;
    assert_eq!(sccs(&graph), sccs(&graph.clone()));
    Ok(())
}

#[test]
fn test_long_cycle() -> Result<()> {
    let n = 500_000;
    let graph = DirectedGraph::from_arcs(n, (1..=n).map(|v| (v, v % n + 1)))?;
    let leaders = sccs(&graph);

    assert_eq!(leaders.num_components(), 1);
    // The root with the highest id is finished last
    assert!(leaders.leaders().iter().all(|&leader| leader == n - 1));
    Ok(())
}

#[test]
fn test_long_chain_of_components() -> Result<()> {
    // n / 2 two-node components in a row
    let n = 400_000;
    let mut graph = DirectedGraph::new(n);
    for v in (1..n).step_by(2) {
        graph.add_arc(v, v + 1)?;
        graph.add_arc(v + 1, v)?;
        if v + 2 <= n {
            graph.add_arc(v + 1, v + 2)?;
        }
    }
    let leaders = sccs(&graph);

    assert_eq!(leaders.num_components(), n / 2);
    assert!(leaders.compute_sizes().values().all(|&size| size == 2));
    Ok(())
}
