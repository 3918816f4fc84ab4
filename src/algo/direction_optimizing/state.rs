/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use nonmax::NonMaxUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use sux::bits::AtomicBitVec;

/// The status of a node that has not been discovered yet.
///
/// Using `usize::MAX` makes the conversion to `Option<NonMaxUsize>` free.
pub const UNVISITED: usize = usize::MAX;

/// Double-buffered per-node levels.
///
/// The previous buffer is a consistent snapshot of the levels assigned up to
/// the last completed round and is only read during a round; the next buffer
/// receives the levels assigned during the current round. A level, once
/// assigned, never changes.
///
/// All accesses are [relaxed](Ordering::Relaxed): rounds are separated by the
/// barrier at the end of each parallel dispatch.
pub struct StatusBuffers {
    prev: Box<[AtomicUsize]>,
    next: Box<[AtomicUsize]>,
}

impl StatusBuffers {
    /// Creates buffers for `num_nodes` nodes, all [unvisited](UNVISITED).
    pub fn new(num_nodes: usize) -> Self {
        Self {
            prev: (0..num_nodes).map(|_| AtomicUsize::new(UNVISITED)).collect(),
            next: (0..num_nodes).map(|_| AtomicUsize::new(UNVISITED)).collect(),
        }
    }

    /// Returns the number of nodes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.prev.len()
    }

    /// Returns whether the buffers have no nodes.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.prev.is_empty()
    }

    /// Marks every node as unvisited, except for `root`, which gets level 0
    /// in both buffers.
    pub fn reset(&mut self, root: usize) {
        for status in self.prev.iter_mut().chain(self.next.iter_mut()) {
            *status.get_mut() = UNVISITED;
        }
        *self.prev[root].get_mut() = 0;
        *self.next[root].get_mut() = 0;
    }

    /// Returns the level of `node` as of the end of the previous round.
    #[inline(always)]
    pub fn prev(&self, node: usize) -> usize {
        self.prev[node].load(Ordering::Relaxed)
    }

    /// Returns the level of `node` as assigned so far in the current round.
    #[inline(always)]
    pub fn next(&self, node: usize) -> usize {
        self.next[node].load(Ordering::Relaxed)
    }

    /// Assigns `level` to `node` in the next buffer.
    ///
    /// Concurrent calls on the same node within a round must all pass the same
    /// level.
    #[inline(always)]
    pub fn set_next(&self, node: usize, level: usize) {
        debug_assert!(self.next(node) == UNVISITED || self.next(node) == level);
        self.next[node].store(level, Ordering::Relaxed);
    }

    /// Copies the level of `node` from the next buffer into the previous one.
    #[inline(always)]
    pub fn copy_forward(&self, node: usize) {
        self.prev[node].store(self.next(node), Ordering::Relaxed);
    }

    /// Returns the levels in the next buffer, with unvisited nodes mapped to
    /// `None`.
    pub fn levels(&self) -> Box<[Option<NonMaxUsize>]> {
        self.next
            .iter()
            .map(|status| NonMaxUsize::new(status.load(Ordering::Relaxed)))
            .collect()
    }
}

/// Per-node frontier membership signals.
///
/// During a round, the node that assigns a level to another node raises its
/// signal; the reduction that follows reads and lowers every signal, so all
/// signals are low when the next round starts.
pub struct FrontierSignal {
    bits: AtomicBitVec,
    num_nodes: usize,
}

impl FrontierSignal {
    /// Creates low signals for `num_nodes` nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            bits: AtomicBitVec::new(num_nodes),
            num_nodes,
        }
    }

    /// Returns the number of nodes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns whether there are no nodes.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Lowers all signals, and then raises the signal of `root`.
    pub fn reset(&mut self, root: usize) {
        self.bits.fill(false, Ordering::Relaxed);
        self.bits.set(root, true, Ordering::Relaxed);
    }

    /// Raises the signal of `node`. Raising a signal twice is harmless.
    #[inline(always)]
    pub fn raise(&self, node: usize) {
        self.bits.set(node, true, Ordering::Relaxed);
    }

    /// Returns whether the signal of `node` is raised.
    #[inline(always)]
    pub fn is_raised(&self, node: usize) -> bool {
        self.bits.get(node, Ordering::Relaxed)
    }

    /// Lowers the signal of `node`, returning whether it was raised.
    #[inline(always)]
    pub fn take(&self, node: usize) -> bool {
        self.bits.swap(node, false, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_reset() {
        let mut status = StatusBuffers::new(4);
        status.set_next(2, 5);
        status.copy_forward(2);
        assert_eq!(status.prev(2), 5);

        status.reset(1);
        assert_eq!(status.len(), 4);
        for node in [0, 2, 3] {
            assert_eq!(status.prev(node), UNVISITED);
            assert_eq!(status.next(node), UNVISITED);
        }
        assert_eq!(status.prev(1), 0);
        assert_eq!(status.next(1), 0);
    }

    #[test]
    fn test_levels() {
        let mut status = StatusBuffers::new(3);
        status.reset(0);
        status.set_next(2, 1);
        // Only the next buffer is reported
        assert_eq!(status.prev(2), UNVISITED);
        let levels: Vec<Option<usize>> = status
            .levels()
            .iter()
            .map(|level| level.map(usize::from))
            .collect();
        assert_eq!(levels, vec![Some(0), None, Some(1)]);
    }

    #[test]
    fn test_frontier_signal() {
        let mut frontier = FrontierSignal::new(70);
        frontier.reset(3);
        assert!(frontier.is_raised(3));
        frontier.raise(65);
        frontier.raise(65);
        assert!(frontier.take(65));
        assert!(!frontier.take(65));
        assert!(frontier.take(3));
        assert!((0..frontier.len()).all(|node| !frontier.is_raised(node)));
    }
}
