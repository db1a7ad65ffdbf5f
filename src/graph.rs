/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Directed graphs built from edge lists.
//!
//! Vertices of an edge list are identified by integers in `[1, n]`; the graph
//! stores them as nodes in `[0, n)`, and all methods of
//! [`RandomAccessGraph`] speak in terms of nodes. The conversion happens only
//! in [`DirectedGraph::add_arc`] and in the methods built on top of it.

use dsi_progress_logger::ProgressLog;
use itertools::Itertools;
use std::io::BufRead;
use thiserror::Error;

/// Errors happening while building a [`DirectedGraph`].
#[derive(Error, Debug)]
pub enum GraphError {
    /// An arc references a vertex outside `[1, num_nodes]`.
    #[error("Vertex {vertex} is out of range: vertices must be between 1 and {num_nodes}")]
    InvalidVertexIndex { vertex: usize, num_nodes: usize },
    /// A line does not contain exactly two tokens.
    #[error("Line {line}: expected two vertex ids separated by whitespace, got {content:?}")]
    MalformedLine { line: usize, content: String },
    /// A token is not a nonnegative integer.
    #[error("Line {line}: could not parse {token:?} as a vertex id")]
    ParseVertex {
        line: usize,
        token: String,
        #[source]
        source: std::num::ParseIntError,
    },
    /// A line was parsed, but its arc was rejected by the graph.
    #[error("Line {line}: invalid arc")]
    Line {
        line: usize,
        #[source]
        source: Box<GraphError>,
    },
    /// The adjacency lists of the graph could not be allocated.
    #[error("Could not allocate a graph with {num_nodes} nodes")]
    Allocation {
        num_nodes: usize,
        #[source]
        source: std::collections::TryReserveError,
    },
    #[error("Could not read line {line}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// A graph providing random access to the successors of its nodes.
///
/// Nodes are numbered from zero. The passes of Kosaraju's algorithm are
/// written against this trait, so the same code can follow outgoing arcs on a
/// [`DirectedGraph`] and incoming arcs on its [transpose](Transposed).
pub trait RandomAccessGraph {
    /// Returns the number of nodes.
    fn num_nodes(&self) -> usize;

    /// Returns the number of arcs, counting multiplicities.
    fn num_arcs(&self) -> u64;

    /// Returns the successors of `node`, in insertion order.
    fn successors(&self, node: usize) -> &[usize];

    /// Returns the number of successors of `node`.
    #[inline(always)]
    fn outdegree(&self, node: usize) -> usize {
        self.successors(node).len()
    }
}

impl<G: RandomAccessGraph + ?Sized> RandomAccessGraph for &G {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        (**self).num_nodes()
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        (**self).num_arcs()
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> &[usize] {
        (**self).successors(node)
    }
}

/// The adjacency of a single node.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Vertex {
    /// Heads of the arcs leaving this node.
    outgoing: Vec<usize>,
    /// Tails of the arcs entering this node.
    incoming: Vec<usize>,
}

/// A directed graph with a fixed number of nodes storing, for each node, both
/// its outgoing and its incoming adjacency list.
///
/// Both lists are filled by [`add_arc`](DirectedGraph::add_arc), so they are
/// symmetric by construction: `v` is a successor of `u` exactly as many times
/// as `u` is a predecessor of `v`. Parallel arcs and self-loops are kept.
///
/// By setting the feature `serde`, this struct can be serialized using
/// [serde](https://crates.io/crates/serde).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectedGraph {
    num_arcs: u64,
    vertices: Box<[Vertex]>,
}

impl DirectedGraph {
    /// Creates a graph with `num_nodes` isolated nodes.
    ///
    /// # Panics
    ///
    /// If memory for `num_nodes` nodes cannot be allocated; use
    /// [`try_new`](DirectedGraph::try_new) to get an error instead.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_arcs: 0,
            vertices: (0..num_nodes).map(|_| Vertex::default()).collect(),
        }
    }

    /// Creates a graph with `num_nodes` isolated nodes, failing with
    /// [`GraphError::Allocation`] if their memory cannot be reserved.
    pub fn try_new(num_nodes: usize) -> Result<Self, GraphError> {
        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(num_nodes)
            .map_err(|source| GraphError::Allocation { num_nodes, source })?;
        vertices.resize_with(num_nodes, Vertex::default);
        Ok(Self {
            num_arcs: 0,
            vertices: vertices.into_boxed_slice(),
        })
    }

    /// Creates a graph with `num_nodes` nodes from pairs `(tail, head)` of
    /// 1-based vertex ids.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::InvalidVertexIndex`] at the first arc with an
    /// endpoint outside `[1, num_nodes]`, and with [`GraphError::Allocation`]
    /// if the nodes do not fit in memory.
    pub fn from_arcs(
        num_nodes: usize,
        arcs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::try_new(num_nodes)?;
        for (tail, head) in arcs {
            graph.add_arc(tail, head)?;
        }
        Ok(graph)
    }

    /// Reads a graph with `num_nodes` nodes from an edge list.
    ///
    /// Each nonblank line must contain exactly two whitespace-separated
    /// 1-based vertex ids, the tail and the head of an arc. Reading stops at
    /// the first bad line: a partial graph would have different components.
    pub fn read_arcs(
        num_nodes: usize,
        reader: impl BufRead,
        pl: &mut impl ProgressLog,
    ) -> Result<Self, GraphError> {
        pl.item_name("arc");
        pl.expected_updates(None);
        let mut graph = Self::try_new(num_nodes)?;
        pl.start("Reading arcs...");

        for (line_num, line) in reader.lines().enumerate() {
            let line_num = line_num + 1;
            let line = line.map_err(|source| GraphError::Io {
                line: line_num,
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let Some((tail, head)) = line.split_whitespace().collect_tuple() else {
                return Err(GraphError::MalformedLine {
                    line: line_num,
                    content: line,
                });
            };
            let tail = parse_vertex(line_num, tail)?;
            let head = parse_vertex(line_num, head)?;

            graph
                .add_arc(tail, head)
                .map_err(|source| GraphError::Line {
                    line: line_num,
                    source: Box::new(source),
                })?;
            pl.light_update();
        }

        pl.done();
        log::info!(
            "Read a graph with {} nodes and {} arcs",
            graph.num_nodes(),
            graph.num_arcs()
        );
        Ok(graph)
    }

    /// Adds an arc from `tail` to `head`, both 1-based vertex ids.
    ///
    /// # Errors
    ///
    /// If one of the ids is outside `[1, num_nodes]` the graph is left
    /// untouched and [`GraphError::InvalidVertexIndex`] is returned.
    pub fn add_arc(&mut self, tail: usize, head: usize) -> Result<(), GraphError> {
        let u = self.node_of(tail)?;
        let v = self.node_of(head)?;
        self.vertices[u].outgoing.push(v);
        self.vertices[v].incoming.push(u);
        self.num_arcs += 1;
        Ok(())
    }

    /// Returns the predecessors of `node`, in insertion order.
    #[inline(always)]
    pub fn predecessors(&self, node: usize) -> &[usize] {
        &self.vertices[node].incoming
    }

    /// Returns the number of predecessors of `node`.
    #[inline(always)]
    pub fn indegree(&self, node: usize) -> usize {
        self.vertices[node].incoming.len()
    }

    /// Returns a view of this graph in which every arc is reversed.
    ///
    /// No adjacency is copied: the successors of a node in the view are its
    /// predecessors in this graph.
    pub fn transpose(&self) -> Transposed<'_> {
        Transposed(self)
    }

    fn node_of(&self, vertex: usize) -> Result<usize, GraphError> {
        if vertex == 0 || vertex > self.vertices.len() {
            return Err(GraphError::InvalidVertexIndex {
                vertex,
                num_nodes: self.vertices.len(),
            });
        }
        Ok(vertex - 1)
    }
}

fn parse_vertex(line: usize, token: &str) -> Result<usize, GraphError> {
    token.parse().map_err(|source| GraphError::ParseVertex {
        line,
        token: token.to_owned(),
        source,
    })
}

impl RandomAccessGraph for DirectedGraph {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.vertices.len()
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        self.num_arcs
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> &[usize] {
        &self.vertices[node].outgoing
    }
}

/// The transpose of a [`DirectedGraph`], as returned by
/// [`DirectedGraph::transpose`].
#[derive(Clone, Copy, Debug)]
pub struct Transposed<'a>(&'a DirectedGraph);

impl RandomAccessGraph for Transposed<'_> {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.0.num_nodes()
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        self.0.num_arcs()
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> &[usize] {
        self.0.predecessors(node)
    }
}
