/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{check_frontier, Dispatch, DispatchError, FrontierCount, Threads};
use crate::algo::direction_optimizing::{FrontierSignal, StatusBuffers, VertexKernel};
use crate::graph::Csr;
use rayon::prelude::*;
use std::borrow::Borrow;

/// A parallel dispatch running lanes on a rayon thread pool.
///
/// The dispatch owns (or borrows) its thread pool for its whole lifetime, so
/// that the same threads serve all rounds of all visits it runs; an owned
/// pool is released when the dispatch is dropped.
///
/// Lanes are split in chunks of at least
/// [`granularity`](Self::with_granularity) nodes. High granularity reduces
/// overhead, but may lead to decreased performance on graphs with a skewed
/// outdegree distribution.
///
/// # Examples
///
/// ```
/// use webgraph_dobfs::prelude::*;
/// use dsi_progress_logger::no_logging;
///
/// let graph = Csr::new(vec![0, 1, 3, 4], vec![1, 0, 2, 1])?;
/// let mut dispatch = ParDispatch::with_num_threads(2)?.with_granularity(1);
/// let distances = DirectionOptimizing::new(&graph)
///     .with_policy(Direction::BottomUp)
///     .visit(0, &mut dispatch, no_logging![])?;
/// assert_eq!(distances.level(2), Some(2));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct ParDispatch<T: Borrow<rayon::ThreadPool> = rayon::ThreadPool> {
    threads: T,
    granularity: usize,
}

impl ParDispatch<rayon::ThreadPool> {
    /// Creates a parallel dispatch with a default thread pool.
    pub fn new() -> Result<Self, DispatchError> {
        Ok(Self::with_threads(Threads::Default.build()?))
    }

    /// Creates a parallel dispatch with a thread pool of the specified size.
    ///
    /// Zero means the default size.
    pub fn with_num_threads(num_threads: usize) -> Result<Self, DispatchError> {
        Ok(Self::with_threads(Threads::from(num_threads).build()?))
    }
}

impl<T: Borrow<rayon::ThreadPool>> ParDispatch<T> {
    pub const DEFAULT_GRANULARITY: usize = 1024;

    /// Creates a parallel dispatch using the specified thread pool.
    pub fn with_threads(threads: T) -> Self {
        Self {
            threads,
            granularity: Self::DEFAULT_GRANULARITY,
        }
    }

    /// Sets the minimum number of lanes per task.
    pub fn with_granularity(mut self, granularity: usize) -> Self {
        self.granularity = granularity.max(1);
        self
    }

    /// Returns the number of threads of the pool.
    pub fn num_threads(&self) -> usize {
        self.threads.borrow().current_num_threads()
    }
}

impl<T: Borrow<rayon::ThreadPool>> Dispatch for ParDispatch<T> {
    fn run_vertex_parallel(&mut self, kernel: &VertexKernel<'_>) -> Result<(), DispatchError> {
        kernel.check()?;
        let granularity = self.granularity;
        self.threads.borrow().install(|| {
            (0..kernel.num_lanes())
                .into_par_iter()
                .with_min_len(granularity)
                .for_each(|node| kernel.apply(node))
        });
        Ok(())
    }

    fn reduce_frontier(
        &mut self,
        frontier: &FrontierSignal,
        graph: &Csr,
    ) -> Result<FrontierCount, DispatchError> {
        check_frontier(frontier, graph)?;
        let granularity = self.granularity;
        Ok(self.threads.borrow().install(|| {
            (0..graph.num_nodes())
                .into_par_iter()
                .with_min_len(granularity)
                .map(|node| FrontierCount::take(frontier, graph, node))
                .reduce(FrontierCount::default, |a, b| a + b)
        }))
    }

    fn update_status(&mut self, status: &StatusBuffers) -> Result<(), DispatchError> {
        let granularity = self.granularity;
        self.threads.borrow().install(|| {
            (0..status.len())
                .into_par_iter()
                .with_min_len(granularity)
                .for_each(|node| status.copy_forward(node))
        });
        Ok(())
    }
}
