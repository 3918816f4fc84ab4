/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::Direction;

/// The information available to a [`DirectionPolicy`] before a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStats {
    /// The level whose frontier is going to be expanded.
    pub level: usize,
    /// The number of nodes at distance [`level`](Self::level) from the root.
    pub frontier_nodes: usize,
    /// The sum of the outdegrees of the frontier nodes.
    pub frontier_arcs: usize,
    /// The sum of the outdegrees of the nodes not discovered yet.
    pub unexplored_arcs: usize,
    /// The number of nodes of the graph.
    pub num_nodes: usize,
    /// The number of arcs of the graph.
    pub num_arcs: usize,
    /// The direction of the previous round, or `None` before the first round.
    pub previous: Option<Direction>,
}

/// A strategy choosing the direction of each round of a
/// [direction-optimizing visit](super::DirectionOptimizing).
///
/// Policies are pure functions of the [`LevelStats`] they are given: the
/// levels computed by a visit do not depend on the policy, only its cost does.
pub trait DirectionPolicy {
    /// Returns the direction of the round described by `stats`.
    fn direction(&self, stats: &LevelStats) -> Direction;
}

/// A direction is the policy that always chooses it.
impl DirectionPolicy for Direction {
    #[inline(always)]
    fn direction(&self, _stats: &LevelStats) -> Direction {
        *self
    }
}

impl<P: DirectionPolicy + ?Sized> DirectionPolicy for &P {
    #[inline(always)]
    fn direction(&self, stats: &LevelStats) -> Direction {
        (**self).direction(stats)
    }
}

/// Chooses the direction using only the level index: rounds with
/// `alpha <= level < beta` are bottom-up, all others top-down.
///
/// `alpha <= beta` is expected but not enforced; if `beta <= alpha` all rounds
/// are top-down. The default thresholds are both zero, which makes every
/// round top-down.
///
/// # Examples
///
/// ```
/// use webgraph_dobfs::prelude::*;
///
/// let policy = LevelThresholds::new(1, 3);
/// let stats = |level| LevelStats {
///     level,
///     frontier_nodes: 1,
///     frontier_arcs: 1,
///     unexplored_arcs: 1,
///     num_nodes: 10,
///     num_arcs: 10,
///     previous: None,
/// };
/// assert_eq!(policy.direction(&stats(0)), Direction::TopDown);
/// assert_eq!(policy.direction(&stats(1)), Direction::BottomUp);
/// assert_eq!(policy.direction(&stats(2)), Direction::BottomUp);
/// assert_eq!(policy.direction(&stats(3)), Direction::TopDown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelThresholds {
    /// The first bottom-up level.
    pub alpha: usize,
    /// The first top-down level after the bottom-up ones.
    pub beta: usize,
}

impl LevelThresholds {
    pub fn new(alpha: usize, beta: usize) -> Self {
        Self { alpha, beta }
    }
}

impl DirectionPolicy for LevelThresholds {
    #[inline(always)]
    fn direction(&self, stats: &LevelStats) -> Direction {
        if self.alpha <= stats.level && stats.level < self.beta {
            Direction::BottomUp
        } else {
            Direction::TopDown
        }
    }
}

/// Chooses the direction by comparing the size of the frontier with the size
/// of the unexplored part of the graph, as in “[Direction-Optimizing
/// Breadth-First Search](https://doi.org/10.3233/SPR-130370)”, by Scott Beamer,
/// Krste Asanović and David Patterson.
///
/// After a top-down round (and at the first round), the visit switches to
/// bottom-up when the frontier arcs are more than the unexplored arcs divided
/// by [`alpha`](Self::alpha). After a bottom-up round, it switches back to
/// top-down when the frontier nodes are fewer than the nodes divided by
/// [`beta`](Self::beta).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierDensity {
    /// The divisor of the unexplored arcs in the top-down to bottom-up test.
    pub alpha: usize,
    /// The divisor of the nodes in the bottom-up to top-down test.
    pub beta: usize,
}

impl FrontierDensity {
    /// The value of [`alpha`](Self::alpha) suggested by Beamer et al.
    pub const DEFAULT_ALPHA: usize = 14;
    /// The value of [`beta`](Self::beta) suggested by Beamer et al.
    pub const DEFAULT_BETA: usize = 24;

    pub fn new(alpha: usize, beta: usize) -> Self {
        Self { alpha, beta }
    }
}

impl Default for FrontierDensity {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALPHA, Self::DEFAULT_BETA)
    }
}

impl DirectionPolicy for FrontierDensity {
    fn direction(&self, stats: &LevelStats) -> Direction {
        match stats.previous.unwrap_or(Direction::TopDown) {
            Direction::TopDown => {
                if stats.frontier_arcs.saturating_mul(self.alpha) > stats.unexplored_arcs {
                    Direction::BottomUp
                } else {
                    Direction::TopDown
                }
            }
            Direction::BottomUp => {
                if stats.frontier_nodes.saturating_mul(self.beta) < stats.num_nodes {
                    Direction::TopDown
                } else {
                    Direction::BottomUp
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn stats(level: usize, previous: Option<Direction>) -> LevelStats {
        LevelStats {
            level,
            frontier_nodes: 0,
            frontier_arcs: 0,
            unexplored_arcs: 0,
            num_nodes: 1000,
            num_arcs: 10_000,
            previous,
        }
    }

    #[test]
    fn test_level_thresholds() {
        let always_top_down = LevelThresholds::default();
        let always_bottom_up = LevelThresholds::new(0, usize::MAX);
        let inverted = LevelThresholds::new(3, 1);
        for level in 0..10 {
            assert_eq!(
                always_top_down.direction(&stats(level, None)),
                Direction::TopDown
            );
            assert_eq!(
                always_bottom_up.direction(&stats(level, None)),
                Direction::BottomUp
            );
            assert_eq!(inverted.direction(&stats(level, None)), Direction::TopDown);
        }
    }

    #[test]
    fn test_fixed_direction() {
        assert_eq!(
            Direction::BottomUp.direction(&stats(0, Some(Direction::TopDown))),
            Direction::BottomUp
        );
        let policy = &Direction::TopDown;
        assert_eq!(
            policy.direction(&stats(7, Some(Direction::BottomUp))),
            Direction::TopDown
        );
    }

    #[test]
    fn test_frontier_density() {
        let policy = FrontierDensity::default();

        // Small frontier: stay top-down
        let mut s = stats(1, Some(Direction::TopDown));
        s.frontier_nodes = 10;
        s.frontier_arcs = 100;
        s.unexplored_arcs = 9000;
        assert_eq!(policy.direction(&s), Direction::TopDown);

        // 700 * 14 > 9000: switch to bottom-up
        s.frontier_arcs = 700;
        assert_eq!(policy.direction(&s), Direction::BottomUp);

        // Large frontier after a bottom-up round: stay bottom-up
        let mut s = stats(2, Some(Direction::BottomUp));
        s.frontier_nodes = 100;
        assert_eq!(policy.direction(&s), Direction::BottomUp);

        // 41 * 24 < 1000: back to top-down
        s.frontier_nodes = 41;
        assert_eq!(policy.direction(&s), Direction::TopDown);

        // The first round behaves as if the previous one was top-down
        let mut s = stats(0, None);
        s.frontier_nodes = 1;
        s.frontier_arcs = 999;
        s.unexplored_arcs = 9001;
        assert_eq!(policy.direction(&s), Direction::BottomUp);
    }
}
