/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{InvalidGraph, OutOfRange};
use webgraph::traits::RandomAccessGraph;

/// An immutable graph in compressed-sparse-row form.
///
/// The successors of node `v` are stored in
/// `neighbors[offsets[v]..offsets[v + 1]]`. The structure is validated once
/// at construction, so accessors never need to check the CSR invariants again.
///
/// # Examples
///
/// ```
/// use webgraph_dobfs::graph::Csr;
///
/// // A 3-node path 0 - 1 - 2, with arcs in both directions
/// let graph = Csr::new(vec![0, 1, 3, 4], vec![1, 0, 2, 1])?;
/// assert_eq!(graph.num_nodes(), 3);
/// assert_eq!(graph.num_arcs(), 4);
/// assert_eq!(graph.neighbors_of(1)?, &[0, 2]);
/// assert!(graph.neighbors_of(3).is_err());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Csr {
    offsets: Box<[usize]>,
    neighbors: Box<[usize]>,
}

impl Csr {
    /// Creates a graph from an offsets/neighbors pair.
    ///
    /// # Arguments
    /// * `offsets`: `num_nodes + 1` non-decreasing values starting from zero.
    /// * `neighbors`: `offsets[num_nodes]` node indices, each smaller than
    ///   `num_nodes`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGraph`] if any of the invariants above is violated.
    pub fn new(offsets: Vec<usize>, neighbors: Vec<usize>) -> Result<Self, InvalidGraph> {
        let (&first, rest) = offsets.split_first().ok_or(InvalidGraph::EmptyOffsets)?;
        if first != 0 {
            return Err(InvalidGraph::NonZeroFirstOffset(first));
        }

        let mut prev = first;
        for (node, &next) in rest.iter().enumerate() {
            if next < prev {
                return Err(InvalidGraph::DecreasingOffsets {
                    node,
                    start: prev,
                    end: next,
                });
            }
            prev = next;
        }

        if prev != neighbors.len() {
            return Err(InvalidGraph::ArcCountMismatch {
                expected: prev,
                actual: neighbors.len(),
            });
        }

        let num_nodes = rest.len();
        if let Some((position, &neighbor)) = neighbors
            .iter()
            .enumerate()
            .find(|&(_, &neighbor)| neighbor >= num_nodes)
        {
            return Err(InvalidGraph::NeighborOutOfRange {
                position,
                neighbor,
                num_nodes,
            });
        }

        Ok(Self {
            offsets: offsets.into_boxed_slice(),
            neighbors: neighbors.into_boxed_slice(),
        })
    }

    /// Creates a graph with `num_nodes` nodes from a list of arcs.
    ///
    /// Arcs may be given in any order; the successors of each node keep the
    /// relative order in which they appear in `arcs`. Duplicate arcs and loops
    /// are kept as they are.
    pub fn from_arcs(
        num_nodes: usize,
        arcs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, InvalidGraph> {
        let arcs: Vec<(usize, usize)> = arcs.into_iter().collect();

        let mut offsets = vec![0; num_nodes + 1];
        for (position, &(src, dst)) in arcs.iter().enumerate() {
            if let Some(neighbor) = [src, dst].into_iter().find(|&v| v >= num_nodes) {
                return Err(InvalidGraph::NeighborOutOfRange {
                    position,
                    neighbor,
                    num_nodes,
                });
            }
            offsets[src + 1] += 1;
        }
        for node in 0..num_nodes {
            offsets[node + 1] += offsets[node];
        }

        // Counting sort by source
        let mut cursor = offsets.clone();
        let mut neighbors = vec![0; arcs.len()];
        for (src, dst) in arcs {
            neighbors[cursor[src]] = dst;
            cursor[src] += 1;
        }

        Self::new(offsets, neighbors)
    }

    /// Copies into compressed-sparse-row form any [`RandomAccessGraph`], such
    /// as a [`BvGraph`](webgraph::prelude::BvGraph) loaded from disk or a
    /// [`VecGraph`](webgraph::prelude::VecGraph) built in memory.
    pub fn from_graph<G: RandomAccessGraph>(graph: &G) -> Self {
        let num_nodes = graph.num_nodes();
        let mut offsets = Vec::with_capacity(num_nodes + 1);
        let mut neighbors = Vec::new();

        offsets.push(0);
        for node in 0..num_nodes {
            neighbors.extend(graph.successors(node));
            offsets.push(neighbors.len());
        }

        debug_assert!(neighbors.iter().all(|&succ| succ < num_nodes));
        Self {
            offsets: offsets.into_boxed_slice(),
            neighbors: neighbors.into_boxed_slice(),
        }
    }

    /// Returns the transpose of this graph, that is, the graph with all arcs
    /// reversed.
    ///
    /// The predecessors of each node are sorted by increasing index.
    pub fn transpose(&self) -> Self {
        let num_nodes = self.num_nodes();
        let mut offsets = vec![0; num_nodes + 1];
        for &dst in self.neighbors.iter() {
            offsets[dst + 1] += 1;
        }
        for node in 0..num_nodes {
            offsets[node + 1] += offsets[node];
        }

        let mut cursor = offsets.clone();
        let mut neighbors = vec![0; self.neighbors.len()];
        for src in 0..num_nodes {
            for &dst in self.successors(src) {
                neighbors[cursor[dst]] = src;
                cursor[dst] += 1;
            }
        }

        Self {
            offsets: offsets.into_boxed_slice(),
            neighbors: neighbors.into_boxed_slice(),
        }
    }

    /// Returns whether every arc `(u, v)` is matched by an arc `(v, u)`, with
    /// the same multiplicity.
    ///
    /// Bottom-up rounds without a transposed graph are correct only on
    /// symmetric graphs.
    pub fn is_symmetric(&self) -> bool {
        let transpose = self.transpose();
        (0..self.num_nodes()).all(|node| {
            let mut succ = self.successors(node).to_vec();
            succ.sort_unstable();
            succ == transpose.successors(node)
        })
    }

    /// Returns the number of nodes.
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the number of arcs.
    #[inline(always)]
    pub fn num_arcs(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns the successors of `node`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `node` is not smaller than
    /// [`num_nodes`](Self::num_nodes).
    pub fn neighbors_of(&self, node: usize) -> Result<&[usize], OutOfRange> {
        if node >= self.num_nodes() {
            return Err(OutOfRange {
                node,
                num_nodes: self.num_nodes(),
            });
        }
        Ok(self.successors(node))
    }

    /// Returns the successors of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not smaller than [`num_nodes`](Self::num_nodes).
    #[inline(always)]
    pub fn successors(&self, node: usize) -> &[usize] {
        &self.neighbors[self.offsets[node]..self.offsets[node + 1]]
    }

    /// Returns the outdegree of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not smaller than [`num_nodes`](Self::num_nodes).
    #[inline(always)]
    pub fn outdegree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    /// Returns the offsets array.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Returns the flat neighbor list.
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }
}
