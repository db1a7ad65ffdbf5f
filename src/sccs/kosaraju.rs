/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{finish_order, Leaders};
use crate::graph::RandomAccessGraph;
use crate::visits::{depth_first::*, Sequential};
use dsi_progress_logger::ProgressLog;
use no_break::NoBreak;
use std::ops::ControlFlow::Continue;

/// Computes the strongly connected components of a graph using Kosaraju's
/// algorithm.
///
/// # Arguments
///
/// * `graph`: the graph.
///
/// * `transpose`: the transpose of `graph` (e.g., the view returned by
///   [`DirectedGraph::transpose`](crate::graph::DirectedGraph::transpose)).
///
/// * `pl`: a progress logger.
pub fn kosaraju(
    graph: impl RandomAccessGraph,
    transpose: impl RandomAccessGraph,
    pl: &mut impl ProgressLog,
) -> Leaders {
    debug_assert_eq!(graph.num_nodes(), transpose.num_nodes());
    log::info!("Kosaraju has started");
    let order = finish_order(&graph, pl);
    let leaders = assign_leaders(&transpose, &order, pl);
    log::info!(
        "Found {} strongly connected components",
        leaders.num_components()
    );
    leaders
}

/// Assigns a leader to every node, given the output of [`finish_order`] on
/// the transpose of `graph`.
///
/// Nodes are scanned in `finish_order`; each node that has no leader yet
/// becomes the leader of all nodes without a leader that it reaches in
/// `graph`, itself included. Each node gets its leader exactly once.
pub fn assign_leaders(
    graph: impl RandomAccessGraph,
    finish_order: &[usize],
    pl: &mut impl ProgressLog,
) -> Leaders {
    let num_nodes = graph.num_nodes();
    debug_assert_eq!(finish_order.len(), num_nodes);
    pl.item_name("node");
    pl.expected_updates(Some(num_nodes));
    pl.start("Assigning leaders...");

    // A node has a leader iff it is known to the visit
    let mut visit = Seq::new(&graph);
    let mut leaders = vec![0; num_nodes].into_boxed_slice();
    let mut num_components = 0;

    visit
        .visit(finish_order.iter().copied(), |event| {
            match event {
                Event::Previsit { node, root, .. } => {
                    pl.light_update();
                    leaders[node] = root;
                }
                Event::Done { .. } => {
                    num_components += 1;
                }
                _ => (),
            }
            Continue(())
        })
        .continue_value_no_break();

    pl.done();

    Leaders::new(num_components, leaders)
}
