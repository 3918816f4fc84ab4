/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

pub mod algo;
pub mod dispatch;
pub mod graph;

/// Module exposing all traits in a single level.
pub mod traits {
    use super::*;
    pub use algo::traits::*;
    pub use dispatch::Dispatch;
}

/// Use `use webgraph_dobfs::prelude::*;` to import common types, functions
/// and all traits.
pub mod prelude {
    use super::*;
    pub use algo::direction_optimizing::{
        direction_optimizing, BfsError, Config, Direction, DirectionOptimizing, Distances,
        FrontierDensity, LevelStats, LevelThresholds, UNVISITED,
    };
    pub use dispatch::{DispatchError, ParDispatch, SeqDispatch, Threads};
    pub use graph::{Csr, InvalidGraph, OutOfRange};
    pub use traits::*;
}
