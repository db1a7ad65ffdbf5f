/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Strongly connected components with Kosaraju's algorithm.
//!
//! The computation is made of two passes:
//!
//! - [`finish_order`] visits the graph depth-first following outgoing arcs
//!   and returns the nodes in decreasing finishing time;
//! - [`assign_leaders`] scans that order and, from each node that has no
//!   leader yet, floods the transpose (i.e., follows incoming arcs), making
//!   the node the leader of everything it reaches.
//!
//! [`kosaraju`] runs the two passes. The orientations can be exchanged
//! (transpose first, graph second), but they must be opposite.
//!
//! # Examples
//! ```
//! use dsi_progress_logger::no_logging;
//! use sccdist::graph::DirectedGraph;
//! use sccdist::sccs::kosaraju;
//!
//! let graph = DirectedGraph::from_arcs(4, [(1, 2), (2, 1), (3, 4), (4, 3), (2, 3)])?;
//! let leaders = kosaraju(&graph, graph.transpose(), no_logging![]);
//!
//! assert_eq!(leaders.num_components(), 2);
//! assert!(leaders.same_component(0, 1));
//! assert!(!leaders.same_component(1, 2));
//! # Ok::<(), sccdist::graph::GraphError>(())
//! ```

mod finish_order;
pub use finish_order::*;

mod kosaraju;
pub use kosaraju::*;

use std::collections::BTreeMap;

/// The leaders of the strongly connected components of a graph.
///
/// An instance of this structure stores, for each node, its
/// [leader](Leaders::leader): a node of the same component, the same for all
/// nodes of the component. Two nodes have the same leader if and only if they
/// are mutually reachable.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaders {
    num_components: usize,
    leaders: Box<[usize]>,
}

impl Leaders {
    pub fn new(num_components: usize, leaders: Box<[usize]>) -> Self {
        Leaders {
            num_components,
            leaders,
        }
    }

    /// Returns the number of strongly connected components.
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Returns the number of nodes of the underlying graph.
    pub fn num_nodes(&self) -> usize {
        self.leaders.len()
    }

    /// Returns a slice containing, for each node, the leader of its component.
    #[inline(always)]
    pub fn leaders(&self) -> &[usize] {
        &self.leaders
    }

    /// Returns the leader of the component of `node`.
    #[inline(always)]
    pub fn leader(&self, node: usize) -> usize {
        self.leaders[node]
    }

    /// Returns whether `u` and `v` are mutually reachable.
    #[inline(always)]
    pub fn same_component(&self, u: usize, v: usize) -> bool {
        self.leaders[u] == self.leaders[v]
    }

    /// Returns the size of each component, indexed by leader.
    pub fn compute_sizes(&self) -> BTreeMap<usize, usize> {
        let mut sizes = BTreeMap::new();
        for &leader in self.leaders() {
            *sizes.entry(leader).or_insert(0) += 1;
        }
        debug_assert_eq!(sizes.len(), self.num_components);
        sizes
    }
}
