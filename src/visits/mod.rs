/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Visits on graphs.
//!
//! Visits accept a callback function with an event argument `A` returning a
//! `ControlFlow<E, ()>`, where `E` is a type parameter of the visit method.
//! If a callback returns a [`Break`](ControlFlow::Break), the visit will be
//! interrupted, and the [`Break`](ControlFlow::Break) value will be the
//! return value of the visit method; for uninterruptible visits we suggest
//! to use the [`no-break`](https://crates.io/crates/no-break) crate and its
//! [`continue_value_no_break`](no_break::NoBreak::continue_value_no_break)
//! method on the result to let type inference run smoothly.
//!
//! Visits keep their state (e.g., which nodes are known) across calls, so
//! that several calls with different roots behave like a single visit. The
//! `reset` method makes it possible to reuse a visit from scratch.

pub mod depth_first;

use std::ops::ControlFlow;

/// A sequential visit.
///
/// Implementations must provide the [`visit_with`](Sequential::visit_with)
/// method, which performs a visit of a graph starting from a given sequence
/// of roots.
pub trait Sequential<A> {
    /// Visits the graph from the specified nodes with an initialization value.
    ///
    /// See the [module documentation](crate::visits) for more information on
    /// the return value.
    ///
    /// # Arguments
    ///
    /// * `roots`: The nodes to start the visit from.
    ///
    /// * `init`: a value the will be passed to the callback function.
    ///
    /// * `callback`: The callback function.
    fn visit_with<
        R: IntoIterator<Item = usize>,
        T,
        E,
        C: FnMut(&mut T, A) -> ControlFlow<E, ()>,
    >(
        &mut self,
        roots: R,
        init: T,
        callback: C,
    ) -> ControlFlow<E, ()>;

    /// Visits the graph from the specified nodes.
    ///
    /// See the [module documentation](crate::visits) for more information on
    /// the return value.
    ///
    /// # Arguments
    ///
    /// * `roots`: The nodes to start the visit from.
    ///
    /// * `callback`: The callback function.
    fn visit<R: IntoIterator<Item = usize>, E, C: FnMut(A) -> ControlFlow<E, ()>>(
        &mut self,
        roots: R,
        mut callback: C,
    ) -> ControlFlow<E, ()> {
        self.visit_with(roots, (), |(), a| callback(a))
    }

    /// Resets the visit status, making it possible to reuse it.
    fn reset(&mut self);
}
