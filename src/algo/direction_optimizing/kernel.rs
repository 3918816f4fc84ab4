/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Direction, FrontierSignal, StatusBuffers, UNVISITED};
use crate::dispatch::DispatchError;
use crate::graph::Csr;

/// The per-node operation of a round.
///
/// A [`Dispatch`](crate::dispatch::Dispatch) applies the kernel to every node
/// (a *lane*) of the graph, in any order and possibly concurrently. Lanes
/// never need to be synchronized:
///
/// - a [top-down](Direction::TopDown) lane whose node has level
///   [`level`](Self::level) assigns level `level + 1` to its unvisited
///   successors; several lanes may assign a level to the same node, but they
///   all write the same value;
/// - a [bottom-up](Direction::BottomUp) lane whose node is unvisited looks for
///   a predecessor with level `level`, and if it finds one assigns level
///   `level + 1` to its own node only.
///
/// In both cases, reads are from the previous status buffer, except for the
/// check made by top-down lanes before writing, and the signal of every node
/// that receives a level is raised.
#[derive(Clone, Copy)]
pub struct VertexKernel<'a> {
    pub direction: Direction,
    /// The level of the current frontier.
    pub level: usize,
    pub graph: &'a Csr,
    /// The graph whose successors are the predecessors in
    /// [`graph`](Self::graph); it is the graph itself on symmetric graphs.
    pub predecessors: &'a Csr,
    pub status: &'a StatusBuffers,
    pub frontier: &'a FrontierSignal,
}

impl VertexKernel<'_> {
    /// Returns the number of lanes, that is, the number of nodes.
    #[inline(always)]
    pub fn num_lanes(&self) -> usize {
        self.graph.num_nodes()
    }

    /// Checks that all buffers have one slot per lane.
    pub fn check(&self) -> Result<(), DispatchError> {
        let expected = self.num_lanes();
        for (buffer, actual) in [
            ("predecessor graph", self.predecessors.num_nodes()),
            ("status buffer", self.status.len()),
            ("frontier signal", self.frontier.len()),
        ] {
            if actual != expected {
                return Err(DispatchError::SizeMismatch {
                    buffer,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Runs the lane of `node`.
    #[inline(always)]
    pub fn apply(&self, node: usize) {
        match self.direction {
            Direction::TopDown => self.push(node),
            Direction::BottomUp => self.pull(node),
        }
    }

    fn push(&self, node: usize) {
        if self.status.prev(node) != self.level {
            return;
        }
        let next_level = self.level + 1;
        for &succ in self.graph.successors(node) {
            // Racing writers store the same value
            if self.status.next(succ) == UNVISITED {
                self.status.set_next(succ, next_level);
                self.frontier.raise(succ);
            }
        }
    }

    fn pull(&self, node: usize) {
        if self.status.prev(node) != UNVISITED {
            return;
        }
        if self
            .predecessors
            .successors(node)
            .iter()
            .any(|&pred| self.status.prev(pred) == self.level)
        {
            self.status.set_next(node, self.level + 1);
            self.frontier.raise(node);
        }
    }
}
