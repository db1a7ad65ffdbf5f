/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Depth-first visits.
//!
//! Callbacks receive an [`Event`]. Since events carry the parent of the
//! current node, all events generated after the root has been previsited can
//! be interpreted as arc events. The only exception are the previsit and
//! postvisit events of the root, for which the parent is the root itself.

use crate::graph::RandomAccessGraph;
use crate::visits::Sequential;
use std::ops::ControlFlow::{self, Continue};
use sux::bits::BitVec;

/// Types of callback events generated during depth-first visits.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum Event {
    /// This event should be used to set up state at the start of the visit
    /// of a new tree.
    ///
    /// Note that this event will not happen if the root is already known.
    Init {
        /// The root of the current visit tree, that is, the first node that
        /// will be visited.
        root: usize,
    },
    /// The node has been encountered for the first time: we are traversing a
    /// new tree arc, unless all node fields are equal to the root.
    Previsit {
        /// The current node.
        node: usize,
        /// The parent of [`node`](`Event::Previsit::node`) in the visit tree,
        /// or [`root`](`Event::Previsit::root`) if
        /// [`node`](`Event::Previsit::node`) is the root.
        parent: usize,
        /// The root of the current visit tree.
        root: usize,
        /// The length of the visit path from the root to
        /// [`node`](`Event::Previsit::node`).
        depth: usize,
    },
    /// The node has been encountered before: we are traversing a back arc, a
    /// forward arc, or a cross arc.
    Revisit {
        /// The current node.
        node: usize,
        /// The node on the visit path whose successor list contains
        /// [`node`](`Event::Revisit::node`).
        pred: usize,
        /// The root of the current visit tree.
        root: usize,
        /// The length of the visit path from the root to
        /// [`pred`](`Event::Revisit::pred`), plus one.
        depth: usize,
    },
    /// The enumeration of the successors of the node has been completed: the
    /// node is finished. We are retreating from a tree arc, unless all node
    /// fields are equal to the root.
    Postvisit {
        /// The current node.
        node: usize,
        /// The parent of [`node`](`Event::Postvisit::node`) in the visit
        /// tree, or [`root`](`Event::Postvisit::root`) if
        /// [`node`](`Event::Postvisit::node`) is the root.
        parent: usize,
        /// The root of the current visit tree.
        root: usize,
        /// The length of the visit path from the root to
        /// [`node`](`Event::Postvisit::node`).
        depth: usize,
    },
    /// The visit of the current tree has been completed.
    ///
    /// Note that this event will not happen if the root was already known or
    /// if the visit is stopped by a callback returning a
    /// [`Break`](ControlFlow::Break).
    Done {
        /// The root of the current visit tree.
        root: usize,
    },
}

/// An entry of the visit path.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    parent: usize,
    /// Position in the successor list of `node` of the next successor to
    /// enumerate.
    cursor: usize,
}

/// Sequential depth-first visits.
///
/// This is an iterative implementation that emulates exactly a recursive
/// visit, but keeps the visit path in a heap-allocated stack, so it does not
/// need a large native stack: it uses one bit per node to remember known
/// nodes and a frame for each node on the visit path.
///
/// A frame is resumable: when a new successor is discovered the frame of the
/// current node is suspended, and it is resumed from the same position in
/// the successor list once the successor is finished. Thus,
/// [postvisit events](Event::Postvisit) happen in the same order, and at the
/// same moments, as the returns of a recursive visit.
///
/// Roots that are already known are skipped, so a visit with roots `0..n`
/// covers the whole graph. If a callback interrupts the visit, nodes
/// previsited so far stay known, but the path is discarded: a later call
/// starts from its own roots, and the interrupted nodes are never postvisited.
///
/// # Examples
///
/// Computing the finishing order of a visit:
///
/// ```
/// use sccdist::graph::DirectedGraph;
/// use sccdist::visits::{depth_first, Sequential};
/// use std::ops::ControlFlow::Continue;
/// use no_break::NoBreak;
///
/// // Vertices are 1-based in edge lists, nodes are 0-based in visits
/// let graph = DirectedGraph::from_arcs(4, [(1, 2), (2, 3), (1, 4)])?;
/// let mut visit = depth_first::Seq::new(&graph);
/// let mut finished = vec![];
///
/// visit
///     .visit([0], |event| {
///         if let depth_first::Event::Postvisit { node, .. } = event {
///             finished.push(node);
///         }
///         Continue(())
///     })
///     .continue_value_no_break();
///
/// assert_eq!(finished, vec![2, 1, 3, 0]);
/// # Ok::<(), sccdist::graph::GraphError>(())
/// ```
pub struct Seq<'a, G: RandomAccessGraph> {
    graph: &'a G,
    stack: Vec<Frame>,
    known: BitVec,
}

impl<'a, G: RandomAccessGraph> Seq<'a, G> {
    /// Creates a new sequential visit.
    ///
    /// # Arguments
    /// * `graph`: an immutable reference to the graph to visit.
    pub fn new(graph: &'a G) -> Seq<'a, G> {
        Self {
            graph,
            stack: Vec::with_capacity(16),
            known: BitVec::new(graph.num_nodes()),
        }
    }

    /// Returns whether `node` has already been encountered by this visit.
    pub fn known(&self, node: usize) -> bool {
        self.known.get(node)
    }
}

impl<G: RandomAccessGraph> Sequential<Event> for Seq<'_, G> {
    fn visit_with<
        R: IntoIterator<Item = usize>,
        T,
        E,
        C: FnMut(&mut T, Event) -> ControlFlow<E, ()>,
    >(
        &mut self,
        roots: R,
        mut init: T,
        mut callback: C,
    ) -> ControlFlow<E, ()> {
        let graph = self.graph;

        for root in roots {
            if self.known.get(root) {
                continue;
            }

            callback(&mut init, Event::Init { root })?;

            self.known.set(root, true);
            callback(
                &mut init,
                Event::Previsit {
                    node: root,
                    parent: root,
                    root,
                    depth: 0,
                },
            )?;

            // Frames left over by an interrupted visit are stale
            self.stack.clear();
            self.stack.push(Frame {
                node: root,
                parent: root,
                cursor: 0,
            });

            'recurse: loop {
                let Some(depth) = self.stack.len().checked_sub(1) else {
                    break;
                };
                let frame = &mut self.stack[depth];
                let succs = graph.successors(frame.node);

                while let Some(&succ) = succs.get(frame.cursor) {
                    frame.cursor += 1;
                    if self.known.get(succ) {
                        callback(
                            &mut init,
                            Event::Revisit {
                                node: succ,
                                pred: frame.node,
                                root,
                                depth: depth + 1,
                            },
                        )?;
                    } else {
                        // First time seeing the node: suspend the current
                        // frame and descend
                        let parent = frame.node;
                        self.known.set(succ, true);
                        callback(
                            &mut init,
                            Event::Previsit {
                                node: succ,
                                parent,
                                root,
                                depth: depth + 1,
                            },
                        )?;
                        self.stack.push(Frame {
                            node: succ,
                            parent,
                            cursor: 0,
                        });
                        continue 'recurse;
                    }
                }

                // All successors have been enumerated
                let Frame { node, parent, .. } = *frame;
                self.stack.pop();
                callback(
                    &mut init,
                    Event::Postvisit {
                        node,
                        parent,
                        root,
                        depth,
                    },
                )?;
            }

            callback(&mut init, Event::Done { root })?;
        }

        Continue(())
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.known = BitVec::new(self.graph.num_nodes());
    }
}
