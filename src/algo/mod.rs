/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Module containing all algorithm implementations.

pub mod direction_optimizing;

/// Traits used to interact with the implemented algorithms.
pub mod traits {
    pub use super::direction_optimizing::DirectionPolicy;
}
