/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Immutable graphs in compressed-sparse-row form.
//!
//! A [`Csr`] is either built from an already-parsed offsets/neighbors pair,
//! which is validated, or copied from any
//! [`RandomAccessGraph`](webgraph::traits::RandomAccessGraph).

mod csr;
pub use csr::*;

/// The reasons why an offsets/neighbors pair does not describe a graph.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidGraph {
    /// The offsets array must contain at least one element.
    #[error("the offsets array is empty")]
    EmptyOffsets,
    #[error("the first offset is {0}, but it should be 0")]
    NonZeroFirstOffset(usize),
    #[error("the offsets of node {node} are decreasing ({start} > {end})")]
    DecreasingOffsets {
        node: usize,
        start: usize,
        end: usize,
    },
    #[error("the last offset is {expected}, but there are {actual} neighbors")]
    ArcCountMismatch { expected: usize, actual: usize },
    #[error("neighbor {neighbor} at position {position} is not smaller than the number of nodes ({num_nodes})")]
    NeighborOutOfRange {
        position: usize,
        neighbor: usize,
        num_nodes: usize,
    },
    /// A transposed graph must have the same number of nodes and arcs as the
    /// graph it transposes.
    #[error("the transposed graph has {transposed_nodes} nodes and {transposed_arcs} arcs, but the graph has {num_nodes} nodes and {num_arcs} arcs")]
    TransposeMismatch {
        num_nodes: usize,
        num_arcs: usize,
        transposed_nodes: usize,
        transposed_arcs: usize,
    },
}

/// A node index that is not smaller than the number of nodes of a graph.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("node {node} is out of range (the graph has {num_nodes} nodes)")]
pub struct OutOfRange {
    pub node: usize,
    pub num_nodes: usize,
}
