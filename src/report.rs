/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Reports on the sizes of strongly connected components.
//!
//! Leaders are nodes, numbered from zero; reports print them as 1-based
//! vertex ids, like those of the edge list the graph was read from.

use crate::sccs::Leaders;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Graphs with fewer nodes than this get the full size distribution.
pub const FULL_DISTRIBUTION_THRESHOLD: usize = 13;

/// The number of components listed for larger graphs.
pub const TOP_COMPONENTS: usize = 5;

/// The sizes of the strongly connected components of a graph, as pairs
/// `(leader, size)`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SizeReport {
    /// All components, by increasing leader.
    Full(Vec<(usize, usize)>),
    /// The [`TOP_COMPONENTS`] largest components (or all of them, if there
    /// are fewer), by decreasing size and then by increasing leader.
    Largest(Vec<(usize, usize)>),
}

impl SizeReport {
    /// Builds the report: the full distribution for graphs with fewer than
    /// [`FULL_DISTRIBUTION_THRESHOLD`] nodes, the largest components
    /// otherwise.
    pub fn from_leaders(leaders: &Leaders) -> Self {
        log::info!("Computing SCC sizes");
        let sizes = leaders.compute_sizes();
        if leaders.num_nodes() < FULL_DISTRIBUTION_THRESHOLD {
            SizeReport::Full(sizes.into_iter().collect())
        } else {
            log::info!("Finding the {} largest components", TOP_COMPONENTS);
            SizeReport::Largest(largest(sizes, TOP_COMPONENTS))
        }
    }

    /// Returns the `(leader, size)` pairs of the report.
    pub fn entries(&self) -> &[(usize, usize)] {
        match self {
            SizeReport::Full(entries) | SizeReport::Largest(entries) => entries,
        }
    }
}

/// Decreasing size, then increasing leader.
fn by_size(&(l0, s0): &(usize, usize), &(l1, s1): &(usize, usize)) -> Ordering {
    s1.cmp(&s0).then(l0.cmp(&l1))
}

/// Returns the `k` largest components of a size map.
///
/// Ties are broken by increasing leader, so the result depends only on the
/// sizes, not on the order in which components were found.
pub fn largest(sizes: BTreeMap<usize, usize>, k: usize) -> Vec<(usize, usize)> {
    if k == 0 {
        return vec![];
    }
    let mut entries = Vec::from_iter(sizes);
    if entries.len() > k {
        entries.select_nth_unstable_by(k - 1, by_size);
        entries.truncate(k);
    }
    entries.sort_unstable_by(by_size);
    entries
}

fn write_map(f: &mut fmt::Formatter<'_>, entries: &[(usize, usize)]) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (leader, size)) in entries.iter().enumerate() {
        if i != 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}={}", leader + 1, size)?;
    }
    write!(f, "}}")
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeReport::Full(entries) => write_map(f, entries),
            SizeReport::Largest(entries) => {
                writeln!(f, "{} SCCs with maximum size:", entries.len())?;
                write_map(f, entries)
            }
        }
    }
}

/// Lists the leader of every vertex, one `leader vertex` pair per line, in
/// vertex order.
pub struct RootsListing<'a>(pub &'a Leaders);

impl fmt::Display for RootsListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, &leader) in self.0.leaders().iter().enumerate() {
            writeln!(f, "{} {}", leader + 1, node + 1)?;
        }
        Ok(())
    }
}
