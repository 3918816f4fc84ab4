/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{check_frontier, Dispatch, DispatchError, FrontierCount};
use crate::algo::direction_optimizing::{FrontierSignal, StatusBuffers, VertexKernel};
use crate::graph::Csr;

/// A sequential dispatch that runs lanes one at a time, in increasing order.
///
/// It is the reference environment: any other dispatch must compute the same
/// levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeqDispatch;

impl Dispatch for SeqDispatch {
    fn run_vertex_parallel(&mut self, kernel: &VertexKernel<'_>) -> Result<(), DispatchError> {
        kernel.check()?;
        for node in 0..kernel.num_lanes() {
            kernel.apply(node);
        }
        Ok(())
    }

    fn reduce_frontier(
        &mut self,
        frontier: &FrontierSignal,
        graph: &Csr,
    ) -> Result<FrontierCount, DispatchError> {
        check_frontier(frontier, graph)?;
        Ok((0..graph.num_nodes())
            .map(|node| FrontierCount::take(frontier, graph, node))
            .fold(FrontierCount::default(), |acc, count| acc + count))
    }

    fn update_status(&mut self, status: &StatusBuffers) -> Result<(), DispatchError> {
        for node in 0..status.len() {
            status.copy_forward(node);
        }
        Ok(())
    }
}
