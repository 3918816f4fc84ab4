/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::DispatchError;

/// The number of threads of a [`ParDispatch`](super::ParDispatch).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Threads {
    /// As many threads as rayon chooses by default (usually, the number of
    /// logical CPUs, unless `RAYON_NUM_THREADS` is set).
    #[default]
    Default,
    NumThreads(usize),
}

impl Threads {
    /// Builds a thread pool with this number of threads.
    pub fn build(self) -> Result<rayon::ThreadPool, DispatchError> {
        let builder = match self {
            Self::Default => rayon::ThreadPoolBuilder::new(),
            Self::NumThreads(num_threads) => {
                rayon::ThreadPoolBuilder::new().num_threads(num_threads)
            }
        };
        Ok(builder.build()?)
    }
}

impl From<usize> for Threads {
    /// Zero means [`Threads::Default`].
    fn from(num_threads: usize) -> Self {
        match num_threads {
            0 => Self::Default,
            n => Self::NumThreads(n),
        }
    }
}
