/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{
    BfsError, Config, Direction, DirectionPolicy, FrontierSignal, LevelStats, LevelThresholds,
    StatusBuffers, VertexKernel,
};
use crate::dispatch::Dispatch;
use crate::graph::{Csr, InvalidGraph, OutOfRange};
use dsi_progress_logger::ProgressLog;
use nonmax::NonMaxUsize;

/// A direction-optimizing breadth-first visit.
///
/// The visit owns its status buffers and frontier signals, which are
/// allocated once at construction and reused by every round of every call to
/// [`visit`](Self::visit).
///
/// # Examples
///
/// Let's compute the distances from 0 on a 5-cycle, using bottom-up rounds
/// for levels 1 and 2:
///
/// ```
/// use webgraph_dobfs::prelude::*;
/// use dsi_progress_logger::no_logging;
///
/// let graph = Csr::new(
///     vec![0, 2, 4, 6, 8, 10],
///     vec![1, 4, 0, 2, 1, 3, 2, 4, 3, 0],
/// )?;
/// let mut visit = DirectionOptimizing::new(&graph).with_policy(LevelThresholds::new(1, 3));
/// let distances = visit.visit(0, &mut SeqDispatch, no_logging![])?;
///
/// assert_eq!(
///     distances.levels().collect::<Vec<_>>(),
///     vec![Some(0), Some(1), Some(2), Some(2), Some(1)]
/// );
/// assert_eq!(distances.rounds(), 3);
/// assert_eq!(distances.frontier_sizes(), &[2, 2, 0]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct DirectionOptimizing<'a, P: DirectionPolicy = LevelThresholds> {
    graph: &'a Csr,
    transposed: Option<&'a Csr>,
    policy: P,
    status: StatusBuffers,
    frontier: FrontierSignal,
}

impl<'a> DirectionOptimizing<'a, LevelThresholds> {
    /// Creates a visit of `graph` with the default [`LevelThresholds`]
    /// policy, which makes all rounds top-down.
    pub fn new(graph: &'a Csr) -> Self {
        let num_nodes = graph.num_nodes();
        Self {
            graph,
            transposed: None,
            policy: LevelThresholds::default(),
            status: StatusBuffers::new(num_nodes),
            frontier: FrontierSignal::new(num_nodes),
        }
    }
}

impl<'a, P: DirectionPolicy> DirectionOptimizing<'a, P> {
    /// Sets the policy choosing the direction of each round.
    pub fn with_policy<Q: DirectionPolicy>(self, policy: Q) -> DirectionOptimizing<'a, Q> {
        DirectionOptimizing {
            graph: self.graph,
            transposed: self.transposed,
            policy,
            status: self.status,
            frontier: self.frontier,
        }
    }

    /// Sets the transposed graph used by bottom-up rounds to enumerate
    /// predecessors.
    ///
    /// # Arguments
    /// * `transposed`: the transpose of the graph. If [`None`], bottom-up
    ///   rounds enumerate successors, which is correct only if the graph is
    ///   symmetric.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGraph::TransposeMismatch`] if `transposed` has a
    /// different number of nodes or arcs.
    pub fn with_transposed(mut self, transposed: Option<&'a Csr>) -> Result<Self, InvalidGraph> {
        if let Some(t) = transposed {
            if t.num_nodes() != self.graph.num_nodes() || t.num_arcs() != self.graph.num_arcs() {
                return Err(InvalidGraph::TransposeMismatch {
                    num_nodes: self.graph.num_nodes(),
                    num_arcs: self.graph.num_arcs(),
                    transposed_nodes: t.num_nodes(),
                    transposed_arcs: t.num_arcs(),
                });
            }
        }
        self.transposed = transposed;
        Ok(self)
    }

    /// Returns the policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Visits the graph from `root`, returning the level of every node.
    ///
    /// # Arguments
    /// * `root`: the node to start the visit from.
    /// * `dispatch`: the environment running the per-node phases.
    /// * `pl`: a progress logger that implements
    ///   [`dsi_progress_logger::ProgressLog`]; it is updated once per round.
    ///   If `no_logging![]` is passed, logging code should be optimized away
    ///   by the compiler.
    ///
    /// # Errors
    ///
    /// Returns [`BfsError::OutOfRange`] if `root` is not a node of the graph,
    /// and [`BfsError::Dispatch`] if `dispatch` fails; in the latter case,
    /// the visit is abandoned.
    pub fn visit(
        &mut self,
        root: usize,
        mut dispatch: impl Dispatch,
        pl: &mut impl ProgressLog,
    ) -> Result<Distances, BfsError> {
        let num_nodes = self.graph.num_nodes();
        let num_arcs = self.graph.num_arcs();
        if root >= num_nodes {
            return Err(OutOfRange {
                node: root,
                num_nodes,
            }
            .into());
        }
        let predecessors = self.transposed.unwrap_or(self.graph);

        pl.item_name("level");
        pl.expected_updates(None);
        pl.start(format!(
            "Visiting {} nodes and {} arcs from node {}...",
            num_nodes, num_arcs, root
        ));

        self.status.reset(root);
        self.frontier.reset(root);

        // Consume the signal of the root: all signals are low before a round
        let mut frontier = dispatch.reduce_frontier(&self.frontier, self.graph)?;
        debug_assert_eq!(frontier.nodes, 1);
        let mut unexplored_arcs = num_arcs - frontier.arcs;

        let mut frontier_sizes = Vec::new();
        let mut directions = Vec::new();
        let mut previous = None;
        let mut level = 0;

        loop {
            let direction = self.policy.direction(&LevelStats {
                level,
                frontier_nodes: frontier.nodes,
                frontier_arcs: frontier.arcs,
                unexplored_arcs,
                num_nodes,
                num_arcs,
                previous,
            });

            dispatch.run_vertex_parallel(&VertexKernel {
                direction,
                level,
                graph: self.graph,
                predecessors,
                status: &self.status,
                frontier: &self.frontier,
            })?;

            frontier = dispatch.reduce_frontier(&self.frontier, self.graph)?;
            unexplored_arcs = unexplored_arcs.saturating_sub(frontier.arcs);
            frontier_sizes.push(frontier.nodes);
            directions.push(direction);

            pl.info(format_args!(
                "Level {} ({}): found {} frontier node(s)",
                level, direction, frontier.nodes
            ));
            pl.update();

            if frontier.nodes == 0 {
                break;
            }

            dispatch.update_status(&self.status)?;
            previous = Some(direction);
            level += 1;
            debug_assert!(level < num_nodes);
        }

        pl.done();

        Ok(Distances {
            root,
            levels: self.status.levels(),
            frontier_sizes,
            directions,
        })
    }
}

/// Visits `graph` from the root specified in `config`, using a
/// [`LevelThresholds`] policy with the thresholds specified in `config`.
///
/// Bottom-up rounds enumerate successors, so the graph should be symmetric
/// if any round is bottom-up.
pub fn direction_optimizing(
    graph: &Csr,
    config: &Config,
    dispatch: impl Dispatch,
    pl: &mut impl ProgressLog,
) -> Result<Distances, BfsError> {
    DirectionOptimizing::new(graph)
        .with_policy(config.policy())
        .visit(config.root, dispatch, pl)
}

/// The result of a [direction-optimizing visit](DirectionOptimizing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distances {
    root: usize,
    levels: Box<[Option<NonMaxUsize>]>,
    frontier_sizes: Vec<usize>,
    directions: Vec<Direction>,
}

impl Distances {
    /// Returns the root of the visit.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Returns the number of nodes of the visited graph.
    pub fn num_nodes(&self) -> usize {
        self.levels.len()
    }

    /// Returns the level of `node`, that is, its distance from the root, or
    /// [`None`] if `node` is not reachable from the root.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a node of the visited graph.
    #[inline(always)]
    pub fn level(&self, node: usize) -> Option<usize> {
        self.levels[node].map(usize::from)
    }

    /// Returns an iterator on the levels of all nodes, in node order.
    pub fn levels(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.levels.iter().map(|level| level.map(usize::from))
    }

    /// Returns an iterator on pairs made of a node and its level.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<usize>)> + '_ {
        self.levels().enumerate()
    }

    /// Returns the number of rounds, including the last one, which finds no
    /// new node.
    pub fn rounds(&self) -> usize {
        self.frontier_sizes.len()
    }

    /// Returns the number of nodes discovered by each round.
    pub fn frontier_sizes(&self) -> &[usize] {
        &self.frontier_sizes
    }

    /// Returns the direction of each round.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Returns the number of nodes reachable from the root, including the root.
    pub fn num_reached(&self) -> usize {
        1 + self.frontier_sizes.iter().sum::<usize>()
    }

    /// Returns the eccentricity of the root, that is, the maximum level.
    pub fn eccentricity(&self) -> usize {
        self.rounds() - 1
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dispatch::{DispatchError, FrontierCount, ParDispatch, SeqDispatch};
    use anyhow::Result;
    use dsi_progress_logger::no_logging;

    fn cycle() -> Result<Csr> {
        Ok(Csr::new(
            vec![0, 2, 4, 6, 8, 10],
            vec![1, 4, 0, 2, 1, 3, 2, 4, 3, 0],
        )?)
    }

    #[test]
    fn test_cycle() -> Result<()> {
        let graph = cycle()?;
        let config = Config {
            root: 0,
            alpha: 1,
            beta: 3,
        };
        let distances = direction_optimizing(&graph, &config, SeqDispatch, no_logging![])?;

        assert_eq!(
            distances.levels().collect::<Vec<_>>(),
            vec![Some(0), Some(1), Some(2), Some(2), Some(1)]
        );
        assert_eq!(distances.rounds(), 3);
        assert_eq!(distances.frontier_sizes(), &[2, 2, 0]);
        assert_eq!(
            distances.directions(),
            &[Direction::TopDown, Direction::BottomUp, Direction::BottomUp]
        );
        assert_eq!(distances.num_reached(), 5);
        assert_eq!(distances.eccentricity(), 2);
        Ok(())
    }

    #[test]
    fn test_reuse() -> Result<()> {
        let graph = cycle()?;
        let mut dispatch = ParDispatch::with_num_threads(2)?.with_granularity(1);
        let mut visit = DirectionOptimizing::new(&graph).with_policy(LevelThresholds::new(0, 1));

        let from_zero = visit.visit(0, &mut dispatch, no_logging![])?;
        let from_two = visit.visit(2, &mut dispatch, no_logging![])?;
        assert_eq!(from_two.root(), 2);
        assert_eq!(
            from_two.levels().collect::<Vec<_>>(),
            vec![Some(2), Some(1), Some(0), Some(1), Some(2)]
        );
        // Buffers are reset between visits
        assert_eq!(visit.visit(0, &mut dispatch, no_logging![])?, from_zero);
        Ok(())
    }

    #[test]
    fn test_out_of_range_root() -> Result<()> {
        let graph = cycle()?;
        let result = DirectionOptimizing::new(&graph).visit(5, SeqDispatch, no_logging![]);
        assert!(matches!(
            result,
            Err(BfsError::OutOfRange(OutOfRange {
                node: 5,
                num_nodes: 5
            }))
        ));
        Ok(())
    }

    /// Delegates to [`SeqDispatch`], but fails the kernel run of round
    /// `fail_at`.
    struct FailingDispatch {
        fail_at: usize,
        round: usize,
    }

    impl Dispatch for FailingDispatch {
        fn run_vertex_parallel(&mut self, kernel: &VertexKernel<'_>) -> Result<(), DispatchError> {
            let round = self.round;
            self.round += 1;
            if round == self.fail_at {
                return Err(DispatchError::SizeMismatch {
                    buffer: "status buffer",
                    expected: kernel.num_lanes(),
                    actual: 0,
                });
            }
            SeqDispatch.run_vertex_parallel(kernel)
        }

        fn reduce_frontier(
            &mut self,
            frontier: &FrontierSignal,
            graph: &Csr,
        ) -> Result<FrontierCount, DispatchError> {
            SeqDispatch.reduce_frontier(frontier, graph)
        }

        fn update_status(&mut self, status: &StatusBuffers) -> Result<(), DispatchError> {
            SeqDispatch.update_status(status)
        }
    }

    #[test]
    fn test_dispatch_failure_aborts() -> Result<()> {
        let graph = cycle()?;
        let mut visit = DirectionOptimizing::new(&graph).with_policy(LevelThresholds::new(1, 3));

        for fail_at in 0..3 {
            let result = visit.visit(
                0,
                FailingDispatch { fail_at, round: 0 },
                no_logging![],
            );
            assert!(matches!(
                result,
                Err(BfsError::Dispatch(DispatchError::SizeMismatch {
                    expected: 5,
                    actual: 0,
                    ..
                }))
            ));

            // The failed visit leaves nothing behind
            let distances = visit.visit(0, SeqDispatch, no_logging![])?;
            assert_eq!(
                distances.levels().collect::<Vec<_>>(),
                vec![Some(0), Some(1), Some(2), Some(2), Some(1)]
            );
            assert_eq!(distances.frontier_sizes(), &[2, 2, 0]);
        }

        // A dispatch that never reaches its failing round completes normally
        let distances = visit.visit(2, FailingDispatch { fail_at: 3, round: 0 }, no_logging![])?;
        assert_eq!(
            distances.levels().collect::<Vec<_>>(),
            vec![Some(2), Some(1), Some(0), Some(1), Some(2)]
        );
        assert_eq!(distances.frontier_sizes(), &[2, 2, 0]);
        Ok(())
    }

    #[test]
    fn test_transpose_mismatch() -> Result<()> {
        let graph = cycle()?;
        let other = Csr::from_arcs(5, [(0, 1)])?;
        assert!(matches!(
            DirectionOptimizing::new(&graph).with_transposed(Some(&other)),
            Err(InvalidGraph::TransposeMismatch { .. })
        ));
        Ok(())
    }
}
