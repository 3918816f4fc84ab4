/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Execution environments for the per-node phases of a visit.
//!
//! A [`Dispatch`] runs a [`VertexKernel`] on all lanes, sums the frontier
//! signals, and copies the status buffers forward. The visit calls each method
//! at most once per round and never starts a phase before the previous one has
//! returned, so implementations only need to guarantee that all effects of a
//! call are visible when it returns.

mod seq;
pub use seq::*;

mod par;
pub use par::*;

mod threads;
pub use threads::*;

use crate::algo::direction_optimizing::{FrontierSignal, StatusBuffers, VertexKernel};
use crate::graph::Csr;
use std::ops::Add;

/// A failure of the execution environment. It is never recoverable.
#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("could not build the thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("the {buffer} has {actual} slots, but the graph has {expected} nodes")]
    SizeMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// The result of the reduction of the frontier signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrontierCount {
    /// The number of raised signals.
    pub nodes: usize,
    /// The sum of the outdegrees of the nodes with a raised signal.
    pub arcs: usize,
}

impl Add for FrontierCount {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self {
            nodes: self.nodes + rhs.nodes,
            arcs: self.arcs + rhs.arcs,
        }
    }
}

impl FrontierCount {
    /// Returns the contribution of a single lane, lowering its signal.
    #[inline(always)]
    pub(crate) fn take(frontier: &FrontierSignal, graph: &Csr, node: usize) -> Self {
        if frontier.take(node) {
            Self {
                nodes: 1,
                arcs: graph.outdegree(node),
            }
        } else {
            Self::default()
        }
    }
}

/// An environment able to apply per-node operations to all nodes of a graph.
pub trait Dispatch {
    /// Applies `kernel` to every lane.
    ///
    /// On success, all levels assigned and all signals raised by the kernel are
    /// visible to the caller.
    fn run_vertex_parallel(&mut self, kernel: &VertexKernel<'_>) -> Result<(), DispatchError>;

    /// Counts the raised signals of `frontier`, and the arcs of `graph`
    /// leaving the corresponding nodes, lowering all signals.
    ///
    /// The sum is associative and commutative, so lanes can be combined in
    /// any order.
    fn reduce_frontier(
        &mut self,
        frontier: &FrontierSignal,
        graph: &Csr,
    ) -> Result<FrontierCount, DispatchError>;

    /// Copies the next status buffer into the previous one.
    fn update_status(&mut self, status: &StatusBuffers) -> Result<(), DispatchError>;
}

impl<D: Dispatch + ?Sized> Dispatch for &mut D {
    fn run_vertex_parallel(&mut self, kernel: &VertexKernel<'_>) -> Result<(), DispatchError> {
        (**self).run_vertex_parallel(kernel)
    }

    fn reduce_frontier(
        &mut self,
        frontier: &FrontierSignal,
        graph: &Csr,
    ) -> Result<FrontierCount, DispatchError> {
        (**self).reduce_frontier(frontier, graph)
    }

    fn update_status(&mut self, status: &StatusBuffers) -> Result<(), DispatchError> {
        (**self).update_status(status)
    }
}

/// Checks that `frontier` has one signal per node of `graph`.
fn check_frontier(frontier: &FrontierSignal, graph: &Csr) -> Result<(), DispatchError> {
    if frontier.len() != graph.num_nodes() {
        return Err(DispatchError::SizeMismatch {
            buffer: "frontier signal",
            expected: graph.num_nodes(),
            actual: frontier.len(),
        });
    }
    Ok(())
}
