/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Direction-optimizing breadth-first visits.
//!
//! The visit is level-synchronous: round `L` assigns level `L + 1` to all
//! nodes at distance `L + 1` from the root, and no work of round `L + 1`
//! starts before round `L` is complete. Each round is either
//!
//! - [top-down](Direction::TopDown): the nodes of the frontier (those at level
//!   `L`) assign a level to their unvisited successors, or
//! - [bottom-up](Direction::BottomUp): each unvisited node looks for a
//!   predecessor in the frontier.
//!
//! A [`DirectionPolicy`] chooses the direction of each round; the per-node
//! work of a round is a [`VertexKernel`] run by a
//! [`Dispatch`](crate::dispatch::Dispatch). The levels computed do not depend
//! on the policy or on the dispatch.
//!
//! Bottom-up rounds scan predecessors: on directed graphs, a
//! [transposed graph](DirectionOptimizing::with_transposed) must be provided,
//! or the graph is assumed to be symmetric.

mod kernel;
pub use kernel::*;

mod policy;
pub use policy::*;

mod state;
pub use state::*;

mod visit;
pub use visit::*;

use crate::dispatch::DispatchError;
use crate::graph::{InvalidGraph, OutOfRange};
use std::fmt::{Display, Formatter};

/// The direction of a round.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Direction {
    /// Frontier nodes push levels to their successors.
    TopDown,
    /// Unvisited nodes pull levels from their predecessors.
    BottomUp,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::TopDown => f.write_str("top-down"),
            Direction::BottomUp => f.write_str("bottom-up"),
        }
    }
}

/// The parameters of a visit with a [`LevelThresholds`] policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// The node the visit starts from.
    pub root: usize,
    /// The first bottom-up level.
    pub alpha: usize,
    /// The first top-down level after the bottom-up ones.
    pub beta: usize,
}

impl Config {
    /// Returns the policy described by [`alpha`](Self::alpha) and
    /// [`beta`](Self::beta).
    pub fn policy(&self) -> LevelThresholds {
        LevelThresholds::new(self.alpha, self.beta)
    }
}

/// The errors that abort a visit.
///
/// No partial result is ever returned.
#[derive(thiserror::Error, Debug)]
pub enum BfsError {
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] InvalidGraph),
    #[error("invalid root: {0}")]
    OutOfRange(#[from] OutOfRange),
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}
