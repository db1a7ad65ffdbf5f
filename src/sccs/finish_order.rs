/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graph::RandomAccessGraph;
use crate::visits::{depth_first::*, Sequential};
use dsi_progress_logger::ProgressLog;
use no_break::NoBreak;
use std::ops::ControlFlow::Continue;

/// Returns the nodes of the graph in decreasing finishing time of a
/// depth-first visit.
///
/// Roots are tried in decreasing node order, so every node is visited exactly
/// once whatever the connectivity of the graph. Each node is placed at the
/// front of the remaining positions as soon as it is finished, so the first
/// node of the result is the last one to be finished. If the graph is acyclic
/// the result is a topological sort.
pub fn finish_order(graph: impl RandomAccessGraph, pl: &mut impl ProgressLog) -> Box<[usize]> {
    let num_nodes = graph.num_nodes();
    pl.item_name("node");
    pl.expected_updates(Some(num_nodes));
    pl.start("Computing finish order...");

    let mut visit = Seq::new(&graph);
    let mut order = vec![0; num_nodes].into_boxed_slice();
    let mut pos = num_nodes;

    visit
        .visit((0..num_nodes).rev(), |event| {
            match event {
                Event::Previsit { .. } => {
                    pl.light_update();
                }
                Event::Postvisit { node, .. } => {
                    pos -= 1;
                    order[pos] = node;
                }
                _ => (),
            }
            Continue(())
        })
        .continue_value_no_break();

    debug_assert_eq!(pos, 0);
    pl.done();
    order
}
